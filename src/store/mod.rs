//! Async resource state tracking.
//!
//! Each entity type (products, users) and the session own a slice: one
//! [`OperationStatus`] per operation plus the last payloads those
//! operations produced. Slices only change through their reducers; the
//! [`Store`] turns service calls into the intents those reducers consume.

mod app;
pub mod entity;
pub mod mvi;
mod notification;
mod root;
pub mod session;
mod status;

pub use app::Store;
pub use entity::{EntityIntent, EntityOperation, EntityReducer, EntitySlice};
pub use notification::{Notification, NotificationLevel, NotificationQueue, MAX_PENDING_NOTIFICATIONS};
pub use root::{AppIntent, AppReducer, AppState};
pub use session::{SessionIntent, SessionOperation, SessionReducer, SessionState};
pub use status::{OperationSlot, OperationStatus};
