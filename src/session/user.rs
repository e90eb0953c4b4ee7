//! Identity wire models.

use serde::{Deserialize, Serialize};

/// Authenticated account snapshot returned by the identity endpoints.
///
/// Replaced wholesale on login/register, cleared on logout; nothing
/// mutates it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Role keys granted to the account. Order carries no meaning.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    /// Permission codes granted through those roles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

/// Registration payload for `/identity/auth/register/`.
///
/// Unset optional fields are omitted from the wire form entirely, the way
/// the console's registration form sends them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub password: String,
    pub password_confirm: String,
}

/// Body of a successful login/register response.
///
/// Deployments disagree on the token field name: `access_token` in
/// current backends, `token` in older ones. Both are accepted here, and
/// `access_token` wins when both are present.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthPayload {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

impl AuthPayload {
    /// Token and user, when the response carried both. Anything less is an
    /// invalid response and yields `None`.
    pub(crate) fn into_credentials(self) -> Option<(String, User)> {
        let token = self
            .access_token
            .or(self.token)
            .filter(|t| !t.is_empty())?;
        let user = self.user?;
        Some((token, user))
    }
}
