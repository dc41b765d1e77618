//! State of one entity slice.

use crate::model::Entity;
use crate::store::mvi::SliceState;
use crate::store::status::{OperationSlot, OperationStatus};

/// Operations tracked by an entity slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityOperation {
    Count,
    List,
    Fetch,
    Create,
    Update,
    Delete,
}

impl EntityOperation {
    pub const ALL: [EntityOperation; 6] = [
        EntityOperation::Count,
        EntityOperation::List,
        EntityOperation::Fetch,
        EntityOperation::Create,
        EntityOperation::Update,
        EntityOperation::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityOperation::Count => "count",
            EntityOperation::List => "list",
            EntityOperation::Fetch => "fetch",
            EntityOperation::Create => "create",
            EntityOperation::Update => "update",
            EntityOperation::Delete => "delete",
        }
    }

    fn index(self) -> usize {
        match self {
            EntityOperation::Count => 0,
            EntityOperation::List => 1,
            EntityOperation::Fetch => 2,
            EntityOperation::Create => 3,
            EntityOperation::Update => 4,
            EntityOperation::Delete => 5,
        }
    }
}

/// Statuses and cached payloads for one entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySlice<T> {
    operations: [OperationSlot; 6],
    /// Last listed page, `None` until a list succeeds.
    pub entities: Option<Vec<T>>,
    /// Entity last fetched, created or updated.
    pub current: Option<T>,
    /// Total reported by the last successful list.
    ///
    /// Deletes do not decrement it: the demo backend never persists them.
    pub count: Option<u64>,
    /// Result of the count operation, independent of `count`.
    pub total: Option<u64>,
}

impl<T> Default for EntitySlice<T> {
    fn default() -> Self {
        Self {
            operations: Default::default(),
            entities: None,
            current: None,
            count: None,
            total: None,
        }
    }
}

impl<T: Entity> SliceState for EntitySlice<T> {}

impl<T> EntitySlice<T> {
    pub fn slot(&self, operation: EntityOperation) -> &OperationSlot {
        &self.operations[operation.index()]
    }

    pub(crate) fn slot_mut(&mut self, operation: EntityOperation) -> &mut OperationSlot {
        &mut self.operations[operation.index()]
    }

    pub fn status(&self, operation: EntityOperation) -> OperationStatus {
        self.slot(operation).status()
    }

    pub fn error(&self, operation: EntityOperation) -> Option<&str> {
        self.slot(operation).error()
    }

    /// Check if any operation is in flight.
    pub fn is_busy(&self) -> bool {
        self.operations.iter().any(|s| s.status().is_pending())
    }

    /// Entity with identity `id` in the cached page.
    pub fn find(&self, id: u64) -> Option<&T>
    where
        T: Entity,
    {
        self.entities
            .as_ref()
            .and_then(|entities| entities.iter().find(|e| e.id() == Some(id)))
    }
}
