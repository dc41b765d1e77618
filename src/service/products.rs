use std::sync::Arc;

use serde::de::IgnoredAny;

use crate::http::{ApiError, HttpClient};
use crate::model::product::{self, Product, ProductListWire, ProductWire};
use crate::service::paging::{count_query, list_query, Page, TotalWire};

/// CRUD verbs for products.
#[derive(Clone)]
pub struct ProductService {
    http: Arc<HttpClient>,
}

impl ProductService {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Total number of products known to the backend.
    pub async fn count(&self) -> Result<u64, ApiError> {
        let wire: TotalWire = self.http.get("/products", &count_query()).await?;
        Ok(wire.total)
    }

    pub async fn list(&self, page: i64, per_page: u32) -> Result<Page<Product>, ApiError> {
        let wire: ProductListWire = self
            .http
            .get("/products", &list_query(page, per_page))
            .await?;

        tracing::debug!(
            page,
            per_page,
            total = wire.total,
            received = wire.products.len(),
            "Listed products"
        );

        Ok(Page {
            count: wire.total,
            entities: wire.products.into_iter().map(product::from_wire).collect(),
        })
    }

    pub async fn fetch(&self, id: u64) -> Result<Product, ApiError> {
        let wire: ProductWire = self.http.get(&format!("/products/{}", id), &[]).await?;
        Ok(product::from_wire(wire))
    }

    /// The backend echoes the request with a fresh id but does not persist it.
    pub async fn create(&self, product: &Product) -> Result<Product, ApiError> {
        let wire: ProductWire = self
            .http
            .post("/products/add", &product::to_wire(product))
            .await?;
        Ok(product::from_wire(wire))
    }

    pub async fn update(&self, id: u64, product: &Product) -> Result<Product, ApiError> {
        let wire: ProductWire = self
            .http
            .put(&format!("/products/{}", id), &product::to_wire(product))
            .await?;
        let mut updated = product::from_wire(wire);
        updated.id = updated.id.or(Some(id));
        Ok(updated)
    }

    /// Resolves with the deleted id; the response body is not mapped.
    pub async fn delete_entity(&self, id: u64) -> Result<u64, ApiError> {
        let _: IgnoredAny = self.http.delete(&format!("/products/{}", id)).await?;
        Ok(id)
    }
}
