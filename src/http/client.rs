use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::http::error::{error_message, ApiError};
use crate::session::TokenStore;

/// Query string pairs appended to a request URL.
pub type Query<'a> = &'a [(&'a str, String)];

/// JSON client for the demo backend.
///
/// One attempt per call: no retry, no backoff and no whole-request timeout.
pub struct HttpClient {
    client: Client,
    base_url: String,
    tokens: TokenStore,
}

impl HttpClient {
    pub fn new(config: &ApiConfig, tokens: TokenStore) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .build()
            .map_err(|source| ApiError::Transport {
                url: config.base_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Token store consulted for the bearer header.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: Query<'_>) -> Result<T, ApiError> {
        self.request(Method::GET, path, query, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode(body)?;
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode(body)?;
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, &[], None).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<Vec<u8>>,
    ) -> Result<T, ApiError> {
        let url = self.url(path, query)?;
        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.tokens.get() {
            builder = builder.bearer_auth(token.expose());
        }

        if let Some(body) = body {
            builder = builder.body(body);
        }

        tracing::debug!(method = %method, url = %url, "Sending request");

        let response = builder.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            let message = error_message(&bytes);
            tracing::warn!(
                method = %method,
                url = %url,
                status = status.as_u16(),
                message = %message,
                "Request rejected"
            );
            return Err(ApiError::Request {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(method = %method, url = %url, status = status.as_u16(), "Request succeeded");

        serde_json::from_slice(&bytes).map_err(|source| ApiError::Parse { source })
    }

    fn url(&self, path: &str, query: Query<'_>) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(body).map_err(|source| ApiError::Encode { source })
}
