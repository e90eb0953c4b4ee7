//! Request layer: uniform HTTP access to the operations backend.

pub mod client;
pub mod result;

pub use client::ApiClient;
pub use result::{ApiError, ApiResult};
