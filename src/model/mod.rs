//! Entity records, their wire shapes and form parsers.
//!
//! Each entity is a plain record plus free `from_wire`/`to_wire` functions
//! in its module. Identity is `None` until the backend assigns one.

pub mod auth;
pub mod form;
pub mod product;
pub mod user;

pub use auth::Credentials;
pub use form::{FieldError, FormFields, ValidationError};
pub use product::Product;
pub use user::User;

/// Record kept in an entity slice.
pub trait Entity: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Lowercase noun used in logs and notifications.
    const KIND: &'static str;

    fn id(&self) -> Option<u64>;
}
