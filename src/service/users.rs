use std::sync::Arc;

use crate::http::{ApiError, HttpClient};
use crate::model::user::{self, User, UserListWire, UserWire};
use crate::service::paging::{count_query, list_query, Page, TotalWire};

/// CRUD verbs for users. Users cannot be deleted from the playground.
#[derive(Clone)]
pub struct UserService {
    http: Arc<HttpClient>,
}

impl UserService {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn count(&self) -> Result<u64, ApiError> {
        let wire: TotalWire = self.http.get("/users", &count_query()).await?;
        Ok(wire.total)
    }

    pub async fn list(&self, page: i64, per_page: u32) -> Result<Page<User>, ApiError> {
        let wire: UserListWire = self.http.get("/users", &list_query(page, per_page)).await?;

        tracing::debug!(
            page,
            per_page,
            total = wire.total,
            received = wire.users.len(),
            "Listed users"
        );

        Ok(Page {
            count: wire.total,
            entities: wire.users.into_iter().map(user::from_wire).collect(),
        })
    }

    pub async fn fetch(&self, id: u64) -> Result<User, ApiError> {
        let wire: UserWire = self.http.get(&format!("/users/{}", id), &[]).await?;
        Ok(user::from_wire(wire))
    }

    pub async fn create(&self, user: &User) -> Result<User, ApiError> {
        let wire: UserWire = self.http.post("/users/add", &user::to_wire(user)).await?;
        Ok(user::from_wire(wire))
    }

    pub async fn update(&self, id: u64, user: &User) -> Result<User, ApiError> {
        let wire: UserWire = self
            .http
            .put(&format!("/users/{}", id), &user::to_wire(user))
            .await?;
        let mut updated = user::from_wire(wire);
        updated.id = updated.id.or(Some(id));
        Ok(updated)
    }
}
