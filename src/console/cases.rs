//! Case list and intake for the console.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::{ApiClient, ApiResult};
use crate::console::Page;

const CASES_PATH: &str = "/cases/cases/";
const SCENE_CASES_PATH: &str = "/cases/scene-cases/";

fn transition_path(case_id: i64) -> String {
    format!("/cases/cases/{case_id}/transition-status/")
}

/// Case row in the console list.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseSummary {
    pub id: i64,
    pub case_number: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
}

/// Witness statement attached to a scene-case report. Blank fields are
/// sent as empty strings, matching the intake form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Witness {
    pub full_name: String,
    pub phone: String,
    pub national_id: String,
    pub notes: String,
}

/// New case opened from a crime-scene report.
#[derive(Debug, Clone, Serialize)]
pub struct SceneCaseRequest {
    pub title: String,
    pub summary: String,
    pub level: String,
    pub priority: String,
    /// RFC 3339 timestamp of when the scene was attended.
    pub scene_occurred_at: String,
    pub witnesses: Vec<Witness>,
}

pub async fn list_cases(client: &ApiClient, token: &str) -> Result<ApiResult<Vec<CaseSummary>>> {
    Ok(client
        .get::<Page<CaseSummary>>(CASES_PATH, Some(token))
        .await?
        .map(|page| page.results))
}

/// Open a case from a crime-scene report.
pub async fn create_scene_case(
    client: &ApiClient,
    token: &str,
    request: &SceneCaseRequest,
) -> Result<ApiResult<Value>> {
    client.post(SCENE_CASES_PATH, request, Some(token)).await
}

/// Move a case to a new workflow status (e.g. `closed`).
pub async fn transition_status(
    client: &ApiClient,
    token: &str,
    case_id: i64,
    new_status: &str,
) -> Result<ApiResult<Value>> {
    client
        .post(
            &transition_path(case_id),
            &json!({"new_status": new_status}),
            Some(token),
        )
        .await
}
