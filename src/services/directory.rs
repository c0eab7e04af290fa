use crate::models::{Member, MemberStatus};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the member directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Member directory API client
///
/// The directory (the CMS hosting accounts and profiles) owns member
/// identity, profile tags and pairing preferences; this service only ever
/// reads from it. Malformed member documents are skipped rather than failing
/// the whole fetch, so one bad profile cannot abort a cycle.
pub struct DirectoryClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl DirectoryClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }

    /// Fetch the full pairing pool: every member whose status allows pairing
    ///
    /// Paused members are filtered out server-side; quarterly-cadence
    /// eligibility is the engine's call since it depends on meeting history.
    pub async fn get_pairing_pool(&self) -> Result<Vec<Member>, DirectoryError> {
        let statuses = ["active", "quarterly_cadence"];
        let status_filter = statuses.join(",");
        let url = format!(
            "{}/members?status={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&status_filter)
        );

        tracing::debug!("Fetching pairing pool from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Relay-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch members: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("members")
            .and_then(|d| d.as_array())
            .ok_or_else(|| DirectoryError::InvalidResponse("Missing members array".into()))?;

        let members: Vec<Member> = documents
            .iter()
            .filter_map(|doc| match serde_json::from_value::<Member>(doc.clone()) {
                Ok(member) => Some(member),
                Err(e) => {
                    tracing::warn!("Skipping malformed member document: {}", e);
                    None
                }
            })
            .filter(|m| m.status != MemberStatus::PausedForMatching)
            .collect();

        tracing::debug!("Fetched {} members (total: {})", members.len(), total);

        Ok(members)
    }

    /// Fetch a single member by id
    pub async fn get_member(&self, member_id: &str) -> Result<Member, DirectoryError> {
        let url = format!(
            "{}/members/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(member_id)
        );

        tracing::debug!("Fetching member: {}", member_id);

        let response = self
            .client
            .get(&url)
            .header("X-Relay-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(format!(
                "Member {} not found",
                member_id
            )));
        }

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch member: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        serde_json::from_value(json)
            .map_err(|e| DirectoryError::InvalidResponse(format!("Failed to parse member: {}", e)))
    }
}
