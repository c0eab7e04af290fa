use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to run a pairing cycle
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RunCycleRequest {
    /// Cap on accepted pairs; 0 means unlimited
    #[validate(range(max = 500))]
    #[serde(alias = "max_suggestions", rename = "maxSuggestions", default)]
    pub max_suggestions: u16,
    /// Pin the cycle's notion of "now" for reproducible runs; defaults to
    /// the server clock at request time
    #[serde(alias = "as_of", rename = "asOf", default)]
    pub as_of: Option<chrono::DateTime<chrono::Utc>>,
}

impl Default for RunCycleRequest {
    fn default() -> Self {
        Self {
            max_suggestions: 0,
            as_of: None,
        }
    }
}
