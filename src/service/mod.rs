//! Domain services: typed calls in, HTTP requests out.
//!
//! Failures from the HTTP client propagate unchanged; nothing here retries.

mod auth;
pub mod paging;
mod products;
mod users;

pub use auth::AuthService;
pub use paging::Page;
pub use products::ProductService;
pub use users::UserService;
