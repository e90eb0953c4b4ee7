//! Client core for the Police Digital Operations console.
//!
//! Two contracts everything else consumes:
//! - [`ApiClient`] issues HTTP calls against the configured backend and
//!   normalizes every response into an [`ApiResult`].
//! - [`SessionStore`] owns the authenticated user/token lifecycle
//!   (login, registration, logout, persisted restore) on top of the
//!   request layer.
//!
//! The [`console`] module adds typed wrappers for the reporting, access
//! and case endpoints the console screens render.
//!
//! ```no_run
//! use std::sync::Arc;
//! use police_ops_client::{ApiClient, DiskStorage, SessionStore};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = Arc::new(ApiClient::from_env()?);
//! let storage = Arc::new(DiskStorage::open_default()?);
//! let session = SessionStore::new(client.clone(), storage);
//!
//! session.restore();
//! if session.login("alice", "secret").await {
//!     println!("signed in as {:?}", session.user().map(|u| u.username));
//! } else {
//!     eprintln!("{}", session.error().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod console;
pub mod session;

pub use api::{ApiClient, ApiError, ApiResult};
pub use config::ApiConfig;
pub use session::{
    DiskStorage, MemoryStorage, RegisterRequest, Session, SessionStorage, SessionStore, User,
};
