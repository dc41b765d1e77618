//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use playground::config::{ApiConfig, Config};
use playground::http::HttpClient;
use playground::session::{AccessToken, TokenStore};
use playground::store::Store;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub use mock_backend::{CapturedRequest, MockBackend, MockResponse};

/// Config pointing at the mock backend.
pub fn config_for(backend: &MockBackend) -> Config {
    let mut config = Config::default();
    config.api = ApiConfig {
        base_url: backend.base_url(),
        connect_timeout_seconds: 2,
    };
    config
}

pub fn client_for(backend: &MockBackend, tokens: TokenStore) -> Arc<HttpClient> {
    Arc::new(HttpClient::new(&config_for(backend).api, tokens).expect("Failed to build client"))
}

/// Store over an in-memory token store, optionally already signed in.
pub fn store_for(backend: &MockBackend, token: Option<&str>) -> (Store, TokenStore) {
    let tokens = TokenStore::memory();
    if let Some(token) = token {
        tokens
            .set(&AccessToken::new(token).expect("blank token"))
            .expect("Failed to store token");
    }
    let store = Store::from_config(&config_for(backend), tokens.clone()).expect("Failed to build store");
    (store, tokens)
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- Wire fixtures ------------------------------------------------------------

pub fn product_json(id: u64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{} description", title),
        "price": 9.99,
        "discountPercentage": 5.0,
        "rating": 4.5,
        "stock": 12,
        "brand": "Acme",
        "category": "gadgets",
        "thumbnail": format!("https://cdn.example/{}.png", id),
        "images": []
    })
}

/// A products listing with `count` records starting at id `first_id`.
pub fn products_page(total: u64, first_id: u64, count: u64) -> String {
    let products: Vec<_> = (first_id..first_id + count)
        .map(|id| product_json(id, &format!("Product {}", id)))
        .collect();
    json!({ "products": products, "total": total, "skip": first_id.saturating_sub(1), "limit": count }).to_string()
}

pub fn user_json(id: u64, username: &str) -> serde_json::Value {
    json!({
        "id": id,
        "firstName": "Emily",
        "lastName": "Johnson",
        "email": format!("{}@example.com", username),
        "username": username,
        "age": 28,
        "phone": "+81 965-431-3024",
        "image": "https://dummyjson.com/icon/emilys/128"
    })
}

pub fn users_page(total: u64, first_id: u64, count: u64) -> String {
    let users: Vec<_> = (first_id..first_id + count)
        .map(|id| user_json(id, &format!("user{}", id)))
        .collect();
    json!({ "users": users, "total": total, "skip": first_id.saturating_sub(1), "limit": count }).to_string()
}

/// Successful `/auth/login` body.
pub fn login_json(username: &str, token: &str) -> String {
    let mut body = user_json(1, username);
    body["accessToken"] = json!(token);
    body["refreshToken"] = json!("refresh");
    body.to_string()
}
