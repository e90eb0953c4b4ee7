//! Aggregated operations statistics.
//!
//! The reporting endpoints serve three audiences: the public landing page
//! (no token), the signed-in dashboard, and the general reporting screen
//! that pulls every aggregate in one call.

use std::collections::HashMap;

use anyhow::Result;
use serde::Deserialize;

use crate::api::{ApiClient, ApiResult};

const LANDING_STATS_PATH: &str = "/reports/landing-stats/";
const HOMEPAGE_STATS_PATH: &str = "/reports/homepage/";
const GENERAL_REPORT_PATH: &str = "/reports/general/";

// ── Stat models ──────────────────────────────────────────────────

/// Case and staffing counters shown on the landing page and dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationStats {
    #[serde(default)]
    pub total_cases: i64,
    #[serde(default)]
    pub active_cases: i64,
    #[serde(default)]
    pub closed_cases: i64,
    #[serde(default)]
    pub staff_count: i64,
    /// Case counts keyed by workflow status.
    #[serde(default)]
    pub by_status: HashMap<String, i64>,
}

/// Count of cases in one workflow status.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Totals split by status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseCounts {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub by_status: HashMap<String, i64>,
}

/// Reasoning-review counters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApprovalStats {
    #[serde(default)]
    pub reasoning_approved: i64,
    #[serde(default)]
    pub reasoning_rejected: i64,
    #[serde(default)]
    pub reasoning_pending: i64,
}

/// A top-ranked wanted entry from the latest reward computation snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct RankedWanted {
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub ranking_score: Option<f64>,
    #[serde(default)]
    pub reward_amount_rials: Option<i64>,
}

/// Wanted-list counters with the ranked top entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WantedRankings {
    #[serde(default)]
    pub wanted_count: i64,
    #[serde(default)]
    pub most_wanted_count: i64,
    #[serde(default)]
    pub top_ranked: Vec<RankedWanted>,
}

/// Reward tip outcome counters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RewardOutcomes {
    #[serde(default)]
    pub tips_approved: i64,
    #[serde(default)]
    pub tips_rejected: i64,
    #[serde(default)]
    pub tips_pending: i64,
}

/// Everything the general reporting screen renders, in one response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralReport {
    #[serde(default)]
    pub homepage: OperationStats,
    #[serde(default)]
    pub case_counts: CaseCounts,
    #[serde(default)]
    pub stage_distribution: Vec<StatusCount>,
    #[serde(default)]
    pub approvals: ApprovalStats,
    #[serde(default)]
    pub wanted_rankings: WantedRankings,
    #[serde(default)]
    pub reward_outcomes: RewardOutcomes,
}

// ── Operations ───────────────────────────────────────────────────

/// Public landing-page counters; no authentication required.
pub async fn landing_stats(client: &ApiClient) -> Result<ApiResult<OperationStats>> {
    client.get(LANDING_STATS_PATH, None).await
}

/// Dashboard counters for a signed-in operator.
pub async fn homepage_stats(client: &ApiClient, token: &str) -> Result<ApiResult<OperationStats>> {
    client.get(HOMEPAGE_STATS_PATH, Some(token)).await
}

/// Every reporting aggregate in one authenticated call.
pub async fn general_report(client: &ApiClient, token: &str) -> Result<ApiResult<GeneralReport>> {
    client.get(GENERAL_REPORT_PATH, Some(token)).await
}
