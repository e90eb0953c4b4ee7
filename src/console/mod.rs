//! Typed wrappers for the console's read and admin endpoints.
//!
//! Each function is a thin delegation to [`ApiClient`](crate::api::ApiClient);
//! callers branch on the returned [`ApiResult`](crate::api::ApiResult)
//! exactly as the session layer does. Paginated list endpoints unwrap
//! their `results` page here so consumers see plain vectors.

pub mod access;
pub mod cases;
pub mod reports;

use serde::Deserialize;

/// One page of a paginated list response.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Page<T> {
    #[serde(default)]
    pub results: Vec<T>,
}
