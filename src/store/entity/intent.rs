//! Intents for an entity slice.

use crate::model::Entity;
use crate::service::Page;
use crate::store::mvi::Intent;

use super::state::EntityOperation;

/// Lifecycle events of entity operations.
///
/// Every settle carries the generation handed out when its operation was
/// dispatched.
#[derive(Debug, Clone)]
pub enum EntityIntent<T> {
    /// An operation was dispatched.
    Started {
        operation: EntityOperation,
        generation: u64,
    },

    /// Count resolved.
    Counted { generation: u64, total: u64 },

    /// List resolved.
    Listed { generation: u64, page: Page<T> },

    /// Fetch resolved.
    Fetched { generation: u64, entity: T },

    /// Create resolved with the backend's echo.
    Created { generation: u64, entity: T },

    /// Update resolved with the backend's echo.
    Updated { generation: u64, entity: T },

    /// Delete resolved.
    Deleted { generation: u64, id: u64 },

    /// Any operation rejected.
    Failed {
        operation: EntityOperation,
        generation: u64,
        message: String,
    },

    /// Back to the initial state.
    Reset,
}

impl<T: Entity> Intent for EntityIntent<T> {}
