//! Backend address configuration.

/// Environment variable naming the backend's versioned API root.
pub const BASE_URL_ENV: &str = "POLICE_OPS_API_BASE_URL";

/// Local development backend, used when the environment gives nothing.
const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Connection settings for the operations backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Versioned API root without a trailing slash
    /// (e.g. `http://host:8000/api/v1`).
    pub base_url: String,
}

impl ApiConfig {
    /// Config pointing at an explicit base address. Trailing slashes are
    /// trimmed so path joining stays predictable.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Read the base address from `POLICE_OPS_API_BASE_URL`, falling back
    /// to the local development backend when unset or empty.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::new(value.trim()),
            _ => Self::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
