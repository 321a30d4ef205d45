//! REST client for the remote account API.

mod client;
mod error;
pub mod types;

pub use client::{endpoints, ApiClient};
pub use error::{ApiError, ErrorEntry};
pub use types::ApiResponse;
