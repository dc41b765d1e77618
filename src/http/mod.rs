//! HTTP/JSON transport for the demo backend.

mod client;
mod error;

pub use client::{HttpClient, Query};
pub use error::ApiError;
