//! HTTP request layer for the operations backend.
//!
//! [`ApiClient`] owns one `reqwest::Client` and turns every call into an
//! [`ApiResult`]: header construction, base-URL resolution, and the
//! success/error envelope unwrap all happen here, once, so callers only
//! ever branch on the normalized shape.
//!
//! Two-tier failure model: HTTP-level and body-level problems come back as
//! [`ApiResult::Failure`]; only transport failures (DNS, refused
//! connection, timeout) surface as `Err`.

use anyhow::Result;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::result::{unwrap_envelope, ApiError, ApiResult};
use crate::config::ApiConfig;

/// Round-trip timeout for backend calls.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the operations backend.
///
/// One instance per application, shared behind an `Arc` by everything that
/// talks to the backend.
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client against the given backend address.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { config, http })
    }

    /// Build a client against the environment-configured backend.
    pub fn from_env() -> Result<Self> {
        Self::new(ApiConfig::from_env())
    }

    /// The configured API root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Resolve a request path against the configured base. Absolute URLs
    /// pass through untouched.
    fn endpoint_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.config.base_url, path)
        } else {
            format!("{}/{}", self.config.base_url, path)
        }
    }

    /// Issue a request and normalize the response into an [`ApiResult`].
    ///
    /// `Err` means the request never completed. Anything the server
    /// actually answered, including non-2xx statuses and bodies that do
    /// not parse, is an `Ok` carrying [`ApiResult::Failure`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Result<ApiResult<T>> {
        let url = self.endpoint_url(path);

        let mut request = self
            .http
            .request(method, &url)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            request = request.header("Authorization", format!("Token {token}"));
        }
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request.send().await?;
        let status = response.status();

        let is_json = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        // Non-JSON bodies are treated as empty, not as an error.
        let body = if is_json {
            let text = response.text().await?;
            match serde_json::from_str::<Value>(&text) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::debug!("unparseable JSON body from {url}: {e}");
                    return Ok(ApiResult::Failure {
                        status,
                        error: ApiError::invalid_json(),
                    });
                }
            }
        } else {
            serde_json::json!({})
        };

        let envelope = unwrap_envelope(body);

        if !status.is_success() {
            let error = envelope
                .error
                .unwrap_or_else(|| ApiError::http_error(status));
            tracing::debug!("{url} failed ({status}): {:?}", error.message);
            return Ok(ApiResult::Failure { status, error });
        }

        match serde_json::from_value::<T>(envelope.payload) {
            Ok(data) => Ok(ApiResult::Success { status, data }),
            Err(e) => {
                tracing::debug!("response from {url} did not match the expected shape: {e}");
                Ok(ApiResult::Failure {
                    status,
                    error: ApiError::invalid_json(),
                })
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<ApiResult<T>> {
        self.request(Method::GET, path, None, token).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<ApiResult<T>> {
        self.request(Method::POST, path, Some(serde_json::to_value(body)?), token)
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<ApiResult<T>> {
        self.request(Method::PUT, path, Some(serde_json::to_value(body)?), token)
            .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<ApiResult<T>> {
        self.request(Method::PATCH, path, Some(serde_json::to_value(body)?), token)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<ApiResult<T>> {
        self.request(Method::DELETE, path, None, token).await
    }
}
