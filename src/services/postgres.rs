use crate::models::{MeetingRecord, MeetingState, ResponseOutcome, ResponseRecord, Rule, ScoredPair};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("Connection pool error: {0}")]
    PoolError(#[from] deadpool_postgres::PoolError),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// PostgreSQL client for meeting history, responses and rule configuration
///
/// The pairing engine itself never touches the database; this client turns
/// tables into the flat history extracts the context aggregator consumes,
/// and writes a cycle's accepted suggestions back as new meetings.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch the full meeting history for context aggregation
    ///
    /// One query covers everything the aggregator needs: completed meetings
    /// for recency and load counts, and in-flight ones for the exclusion set.
    pub async fn fetch_meeting_history(&self) -> Result<Vec<MeetingRecord>, PostgresError> {
        let query = r#"
            SELECT meeting_id, member_a, member_b, state, created_at, completed_at
            FROM meetings
            ORDER BY created_at
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let meetings: Vec<MeetingRecord> = rows
            .iter()
            .map(|row| MeetingRecord {
                meeting_id: row.get("meeting_id"),
                member_a: row.get("member_a"),
                member_b: row.get("member_b"),
                state: row.get("state"),
                created_at: row.get("created_at"),
                completed_at: row.get("completed_at"),
            })
            .collect();

        tracing::debug!("Fetched {} meeting records", meetings.len());

        Ok(meetings)
    }

    /// Fetch suggestion response history for acceptance-rate aggregation
    pub async fn fetch_response_history(&self) -> Result<Vec<ResponseRecord>, PostgresError> {
        let query = r#"
            SELECT member_id, outcome, responded_at
            FROM meeting_responses
            ORDER BY responded_at
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let responses: Vec<ResponseRecord> = rows
            .iter()
            .map(|row| ResponseRecord {
                member_id: row.get("member_id"),
                outcome: row.get::<ResponseOutcome, _>("outcome"),
                responded_at: row.get("responded_at"),
            })
            .collect();

        tracing::debug!("Fetched {} response records", responses.len());

        Ok(responses)
    }

    /// Fetch the active rule set
    ///
    /// Weight, active flag and config are operator-editable between cycles;
    /// a config blob that fails to parse is replaced with null so one bad
    /// rule row cannot abort the fetch.
    pub async fn fetch_active_rules(&self) -> Result<Vec<Rule>, PostgresError> {
        let query = r#"
            SELECT rule_key, label, weight, is_active, config
            FROM pairing_rules
            WHERE is_active = TRUE
            ORDER BY rule_key
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let rules: Vec<Rule> = rows
            .iter()
            .map(|row| Rule {
                rule_key: row.get("rule_key"),
                label: row.get("label"),
                weight: row.get("weight"),
                is_active: row.get("is_active"),
                config: row
                    .try_get::<serde_json::Value, _>("config")
                    .unwrap_or(serde_json::Value::Null),
            })
            .collect();

        tracing::debug!("Fetched {} active rules", rules.len());

        Ok(rules)
    }

    /// Persist a cycle's accepted pairs as suggested meetings
    ///
    /// Uses ON CONFLICT DO NOTHING on the canonical pair so a retried cycle
    /// cannot double-suggest a pair that already has an open meeting.
    pub async fn record_suggestions(
        &self,
        cycle_id: &str,
        pairs: &[ScoredPair],
    ) -> Result<u64, PostgresError> {
        let mut inserted = 0;

        for pair in pairs {
            let (low, high) = if pair.member_a <= pair.member_b {
                (&pair.member_a, &pair.member_b)
            } else {
                (&pair.member_b, &pair.member_a)
            };

            let query = r#"
                INSERT INTO meetings
                    (meeting_id, cycle_id, member_a, member_b, state, total_score, breakdown, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
                ON CONFLICT (member_a, member_b) WHERE state IN ('suggested', 'accepted', 'scheduled')
                DO NOTHING
            "#;

            let breakdown = serde_json::to_value(&pair.breakdown)
                .map_err(|e| PostgresError::InvalidInput(e.to_string()))?;

            let result = sqlx::query(query)
                .bind(uuid::Uuid::new_v4().to_string())
                .bind(cycle_id)
                .bind(low)
                .bind(high)
                .bind(MeetingState::Suggested)
                .bind(pair.total_score)
                .bind(breakdown)
                .execute(&self.pool)
                .await?;

            inserted += result.rows_affected();
        }

        tracing::info!(
            "Recorded {} of {} suggestions for cycle {}",
            inserted,
            pairs.len(),
            cycle_id
        );

        Ok(inserted)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
