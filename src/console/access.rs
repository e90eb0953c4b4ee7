//! Role administration for the admin screen.

use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{ApiClient, ApiResult};
use crate::console::Page;

const ROLES_PATH: &str = "/access/roles/";
const USERS_PATH: &str = "/access/users/";

fn user_roles_path(user_id: i64) -> String {
    format!("/access/users/{user_id}/roles/")
}

fn user_role_path(user_id: i64, role_id: i64) -> String {
    format!("/access/users/{user_id}/roles/{role_id}/")
}

/// A grantable role.
#[derive(Debug, Clone, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// An account as listed by the admin screen.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub is_staff: Option<bool>,
}

/// One granted role, carrying the grant's own id.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleAssignment {
    pub id: i64,
    pub role: Role,
}

/// An account together with its granted roles.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRoles {
    pub user: UserAccount,
    #[serde(default)]
    pub roles: Vec<RoleAssignment>,
}

pub async fn list_roles(client: &ApiClient, token: &str) -> Result<ApiResult<Vec<Role>>> {
    Ok(client
        .get::<Page<Role>>(ROLES_PATH, Some(token))
        .await?
        .map(|page| page.results))
}

pub async fn list_users(client: &ApiClient, token: &str) -> Result<ApiResult<Vec<UserAccount>>> {
    Ok(client
        .get::<Page<UserAccount>>(USERS_PATH, Some(token))
        .await?
        .map(|page| page.results))
}

/// The roles currently granted to one account.
pub async fn user_roles(
    client: &ApiClient,
    token: &str,
    user_id: i64,
) -> Result<ApiResult<UserRoles>> {
    client.get(&user_roles_path(user_id), Some(token)).await
}

/// Grant a role to an account.
pub async fn assign_role(
    client: &ApiClient,
    token: &str,
    user_id: i64,
    role_id: i64,
) -> Result<ApiResult<Value>> {
    client
        .post(&user_roles_path(user_id), &json!({"role_id": role_id}), Some(token))
        .await
}

/// Revoke a role from an account.
pub async fn remove_role(
    client: &ApiClient,
    token: &str,
    user_id: i64,
    role_id: i64,
) -> Result<ApiResult<Value>> {
    client
        .delete(&user_role_path(user_id, role_id), Some(token))
        .await
}
