use crate::models::domain::{Rule, ScoredPair};
use serde::{Deserialize, Serialize};

/// Response for the run-cycle and preview endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunCycleResponse {
    pub pairs: Vec<ScoredPair>,
    #[serde(rename = "eligibleMembers")]
    pub eligible_members: usize,
    #[serde(rename = "scoredPairs")]
    pub scored_pairs: usize,
    #[serde(rename = "cycleId")]
    pub cycle_id: String,
    #[serde(rename = "dryRun")]
    pub dry_run: bool,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Active rule set as served to operators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesResponse {
    pub rules: Vec<Rule>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
