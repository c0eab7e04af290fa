use serde::{Deserialize, Serialize};

/// Pairing participation status, owned by the member directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    PausedForMatching,
    QuarterlyCadence,
}

/// Member record as served by the directory
///
/// Immutable for the duration of one pairing cycle. The tag lists are
/// free-text, lowercase, and treated as unordered sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "memberId")]
    pub member_id: String,
    pub name: String,
    #[serde(rename = "joinedAt")]
    pub joined_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(rename = "lookingFor", default)]
    pub looking_for: Vec<String>,
    #[serde(rename = "canHelpWith", default)]
    pub can_help_with: Vec<String>,
    #[serde(default = "default_status")]
    pub status: MemberStatus,
}

fn default_status() -> MemberStatus {
    MemberStatus::Active
}

impl Member {
    /// Days of membership as of `now`; clamped at zero for clock skew
    pub fn tenure_days(&self, now: chrono::DateTime<chrono::Utc>) -> i64 {
        (now - self.joined_at).num_days().max(0)
    }
}

/// Lifecycle state of a 1:1 meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "meeting_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MeetingState {
    Suggested,
    Accepted,
    Scheduled,
    Closed,
    Declined,
    Cancelled,
}

impl MeetingState {
    /// Terminal states release the pair for future suggestion
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MeetingState::Closed | MeetingState::Declined | MeetingState::Cancelled
        )
    }
}

/// Raw meeting history row from the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub meeting_id: String,
    pub member_a: String,
    pub member_b: String,
    pub state: MeetingState,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Outcome of a member responding to a pairing suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "response_outcome", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResponseOutcome {
    Accepted,
    Declined,
    Expired,
}

/// Raw response history row from the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub member_id: String,
    pub outcome: ResponseOutcome,
    pub responded_at: chrono::DateTime<chrono::Utc>,
}

/// A scoring rule instance
///
/// Rules are data: the key selects a known evaluator, while weight, active
/// flag and config are operator-mutable between cycles. Negative weights turn
/// a rule into a penalty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "ruleKey")]
    pub rule_key: String,
    pub label: String,
    pub weight: f64,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub config: serde_json::Value,
}

fn default_true() -> bool {
    true
}

impl Rule {
    pub fn new(rule_key: &str, weight: f64) -> Self {
        Self {
            rule_key: rule_key.to_string(),
            label: rule_key.replace('_', " "),
            weight,
            is_active: true,
            config: serde_json::Value::Null,
        }
    }
}

/// One rule's contribution to a pair's total score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleScore {
    #[serde(rename = "ruleKey")]
    pub rule_key: String,
    pub raw: f64,
    pub weight: f64,
    pub weighted: f64,
}

/// A scored candidate pair with its per-rule breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPair {
    #[serde(rename = "memberA")]
    pub member_a: String,
    #[serde(rename = "memberB")]
    pub member_b: String,
    #[serde(rename = "totalScore")]
    pub total_score: f64,
    pub breakdown: Vec<RuleScore>,
}
