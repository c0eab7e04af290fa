use crate::core::context::{build_context, CycleContext};
use crate::core::scorer::score_pairs;
use crate::core::selector::select_pairs;
use crate::models::{Member, MemberStatus, MeetingRecord, ResponseRecord, Rule, ScoredPair};
use chrono::{DateTime, Utc};

/// Default lookback window for reduced-cadence members, in days
pub const DEFAULT_CADENCE_LOOKBACK_DAYS: i64 = 80;

/// Engine tuning knobs, loaded from configuration at startup
#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    /// A quarterly-cadence member sits out if they met anyone within this window
    pub cadence_lookback_days: i64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            cadence_lookback_days: DEFAULT_CADENCE_LOOKBACK_DAYS,
        }
    }
}

/// Result of one pairing cycle
#[derive(Debug)]
pub struct CycleResult {
    /// Accepted pairs, best first; every member id appears at most once
    pub pairs: Vec<ScoredPair>,
    pub eligible_members: usize,
    pub scored_pairs: usize,
}

impl CycleResult {
    fn empty(eligible_members: usize) -> Self {
        Self {
            pairs: Vec::new(),
            eligible_members,
            scored_pairs: 0,
        }
    }
}

/// Cycle orchestrator: aggregate history, score all pairs, select greedily
///
/// One `run_cycle` call is a pure, synchronous batch over the snapshot it is
/// handed. Identical inputs, including `now`, produce identical output; the
/// engine never reads the wall clock or any other ambient state, and performs
/// no I/O of its own.
#[derive(Debug, Clone)]
pub struct PairingEngine {
    settings: EngineSettings,
}

impl PairingEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn with_defaults() -> Self {
        Self {
            settings: EngineSettings::default(),
        }
    }

    /// Run one full pairing cycle
    ///
    /// Fewer than 2 eligible members or no active rule is not an error: an
    /// empty cycle is a normal outcome and returns an empty result.
    pub fn run_cycle(
        &self,
        members: &[Member],
        meetings: &[MeetingRecord],
        responses: &[ResponseRecord],
        rules: &[Rule],
        now: DateTime<Utc>,
        max_suggestions: usize,
    ) -> CycleResult {
        let ctx = build_context(meetings, responses);

        let eligible: Vec<Member> = members
            .iter()
            .filter(|m| self.is_eligible(m, &ctx, now))
            .cloned()
            .collect();

        let has_active_rule = rules.iter().any(|r| r.is_active);
        if eligible.len() < 2 || !has_active_rule {
            tracing::debug!(
                "Empty cycle: {} eligible members, active rules: {}",
                eligible.len(),
                has_active_rule
            );
            return CycleResult::empty(eligible.len());
        }

        let scored = score_pairs(&eligible, rules, &ctx, now);
        let scored_count = scored.len();
        let pairs = select_pairs(scored, max_suggestions);

        CycleResult {
            pairs,
            eligible_members: eligible.len(),
            scored_pairs: scored_count,
        }
    }

    /// Per-member participation filter, applied before any pair is formed
    fn is_eligible(&self, member: &Member, ctx: &CycleContext, now: DateTime<Utc>) -> bool {
        match member.status {
            MemberStatus::Active => true,
            MemberStatus::PausedForMatching => false,
            MemberStatus::QuarterlyCadence => match ctx.last_met_anyone(&member.member_id) {
                Some(last) => (now - last).num_days() > self.settings.cadence_lookback_days,
                None => true,
            },
        }
    }
}

impl Default for PairingEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
