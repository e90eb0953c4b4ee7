//! Authenticated session lifecycle.
//!
//! One [`SessionStore`] exists per running application. It is constructed
//! explicitly (request client and storage injected) and shared behind an
//! `Arc`; consumers read cheap snapshots and drive the state through the
//! login/register/logout operations.
//!
//! State machine: unknown (constructed, `loading` true) → [`restore`] →
//! authenticated or anonymous. `logout` moves authenticated → anonymous; a
//! successful `login`/`register` moves the other way. The store never
//! re-enters the restoring state, and none of its operations return `Err`:
//! failures come back as `false` with a display string in `error`.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::json;

use crate::api::{ApiClient, ApiResult};
use crate::session::storage::{SessionStorage, TOKEN_KEY, USER_KEY};
use crate::session::user::{AuthPayload, RegisterRequest, User};

const LOGIN_PATH: &str = "/identity/auth/login/";
const REGISTER_PATH: &str = "/identity/auth/register/";
const LOGOUT_PATH: &str = "/identity/auth/logout/";
const ME_PATH: &str = "/identity/auth/me/";

/// Point-in-time view of the session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    /// True until the persisted session has been checked.
    pub loading: bool,
    /// Outcome of the most recent login/register attempt. Cleared only at
    /// the start of a new attempt or through [`SessionStore::set_error`].
    pub error: Option<String>,
}

/// The application's single authenticated session.
///
/// Token and user are set together or cleared together, in memory and in
/// durable storage, never one without the other.
pub struct SessionStore {
    client: Arc<ApiClient>,
    storage: Arc<dyn SessionStorage>,
    state: RwLock<Session>,
}

impl SessionStore {
    /// New store in the unknown state. Call [`restore`](Self::restore)
    /// once at startup to resolve it.
    pub fn new(client: Arc<ApiClient>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            client,
            storage,
            state: RwLock::new(Session {
                loading: true,
                ..Session::default()
            }),
        }
    }

    /// Pre-populate the session from durable storage.
    ///
    /// Both values present and parseable → authenticated. A corrupt user
    /// blob clears both persisted keys. Either value absent → anonymous.
    /// Ends with `loading` false in every case.
    pub fn restore(&self) {
        let token = self.storage.get(TOKEN_KEY);
        let blob = self.storage.get(USER_KEY);

        let restored = match (token, blob) {
            (Some(token), Some(blob)) => match serde_json::from_str::<User>(&blob) {
                Ok(user) => Some((token, user)),
                Err(e) => {
                    tracing::warn!("discarding corrupt persisted session: {e}");
                    self.clear_persisted();
                    None
                }
            },
            _ => None,
        };

        let mut state = self.state.write();
        if let Some((token, user)) = restored {
            state.token = Some(token);
            state.user = Some(user);
        }
        state.loading = false;
    }

    /// Authenticate with a username/email/phone/national-id identifier.
    ///
    /// Returns whether the session is now authenticated; on `false` the
    /// reason is in [`error`](Self::error) and token/user are untouched.
    pub async fn login(&self, identifier: &str, password: &str) -> bool {
        self.set_error(None);

        let body = json!({"identifier": identifier, "password": password});
        match self.client.post::<AuthPayload, _>(LOGIN_PATH, &body, None).await {
            Ok(ApiResult::Success { data, .. }) => self.accept_credentials(data),
            Ok(ApiResult::Failure { error, .. }) => {
                self.set_error(Some(error.message_or("Login failed").to_string()));
                false
            }
            Err(e) => {
                tracing::warn!("login request failed before reaching the backend: {e:#}");
                self.set_error(Some("Login failed".to_string()));
                false
            }
        }
    }

    /// Create an account and authenticate in one step.
    ///
    /// Same contract as [`login`](Self::login); validation failures prefer
    /// the backend's per-field message for the identifier before the
    /// envelope's generic one.
    pub async fn register(&self, request: &RegisterRequest) -> bool {
        self.set_error(None);

        match self
            .client
            .post::<AuthPayload, _>(REGISTER_PATH, request, None)
            .await
        {
            Ok(ApiResult::Success { data, .. }) => self.accept_credentials(data),
            Ok(ApiResult::Failure { error, .. }) => {
                let message = error
                    .detail_message("identifier")
                    .map(str::to_string)
                    .unwrap_or_else(|| error.message_or("Registration failed").to_string());
                self.set_error(Some(message));
                false
            }
            Err(e) => {
                tracing::warn!("registration request failed before reaching the backend: {e:#}");
                self.set_error(Some("Registration failed".to_string()));
                false
            }
        }
    }

    /// End the session.
    ///
    /// Best-effort server-side revocation: any failure of that call is
    /// swallowed. Local state and persisted values are cleared no matter
    /// what; logout always succeeds from the caller's point of view.
    pub async fn logout(&self) {
        let token = self.token();
        if let Some(token) = token {
            match self
                .client
                .post::<serde_json::Value, _>(LOGOUT_PATH, &json!({}), Some(&token))
                .await
            {
                Ok(res) if !res.is_success() => {
                    tracing::debug!("logout revocation rejected ({})", res.status());
                }
                Err(e) => tracing::debug!("logout revocation unreachable: {e:#}"),
                Ok(_) => {}
            }
        }

        {
            let mut state = self.state.write();
            state.token = None;
            state.user = None;
        }
        self.clear_persisted();
    }

    /// Re-fetch the current user with the stored token and replace the
    /// in-memory and persisted snapshot. Leaves everything untouched on
    /// any failure; never touches [`error`](Self::error).
    pub async fn refresh_user(&self) -> bool {
        let Some(token) = self.token() else {
            return false;
        };

        match self.client.get::<User>(ME_PATH, Some(&token)).await {
            Ok(ApiResult::Success { data: user, .. }) => {
                self.persist_credentials(&token, &user);
                self.state.write().user = Some(user);
                true
            }
            Ok(ApiResult::Failure { status, .. }) => {
                tracing::debug!("current-user refresh rejected ({status})");
                false
            }
            Err(e) => {
                tracing::debug!("current-user refresh unreachable: {e:#}");
                false
            }
        }
    }

    /// Direct setter for the error field; consumers use it to clear stale
    /// error display on new interactions.
    pub fn set_error(&self, error: Option<String>) {
        self.state.write().error = error;
    }

    pub fn snapshot(&self) -> Session {
        self.state.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().token.is_some()
    }

    pub fn loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Validate an auth payload and, when complete, adopt it as the
    /// current session.
    fn accept_credentials(&self, payload: AuthPayload) -> bool {
        let Some((token, user)) = payload.into_credentials() else {
            self.set_error(Some("Invalid response from server".to_string()));
            return false;
        };

        self.persist_credentials(&token, &user);
        let mut state = self.state.write();
        state.token = Some(token);
        state.user = Some(user);
        true
    }

    /// Write the token/user pair durably. A failure mid-pair removes both
    /// keys again so storage never holds half a session.
    fn persist_credentials(&self, token: &str, user: &User) {
        let written = serde_json::to_string(user)
            .map_err(anyhow::Error::from)
            .and_then(|blob| {
                self.storage.set(TOKEN_KEY, token)?;
                self.storage.set(USER_KEY, &blob)
            });
        if let Err(e) = written {
            tracing::warn!("failed to persist session: {e:#}");
            self.clear_persisted();
        }
    }

    fn clear_persisted(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!("failed to clear persisted session key {key}: {e:#}");
            }
        }
    }
}
