//! Shared API types - response envelope, JSON extraction, and error mapping

pub mod error;
pub mod json;
pub mod response;

pub use error::ApiError;
pub use json::Json;
pub use response::{ApiResponse, PaginatedResponse};
