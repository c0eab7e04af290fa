use crate::core::pair::PairKey;
use crate::models::{MeetingRecord, ResponseRecord};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Read-only historical snapshot shared by all rule evaluations in a cycle
///
/// Built once per cycle with a single pass over each history stream, so that
/// the O(n²) scoring loop only ever does O(1) map reads. Never mutated after
/// construction.
#[derive(Debug, Default)]
pub struct CycleContext {
    /// Most recent completed meeting per canonical pair
    pub last_meeting_by_pair: HashMap<PairKey, DateTime<Utc>>,
    /// Completed-meeting participation count per member
    pub meetings_by_member: HashMap<String, u32>,
    /// Historical suggestion-acceptance rate per member, in [0, 1]
    pub acceptance_by_member: HashMap<String, f64>,
    /// Most recent completed meeting per member, for cadence eligibility
    pub last_meeting_by_member: HashMap<String, DateTime<Utc>>,
    /// Pairs with a meeting still in flight; never re-suggested
    pub active_pairs: HashSet<PairKey>,
}

impl CycleContext {
    pub fn last_met(&self, a: &str, b: &str) -> Option<DateTime<Utc>> {
        self.last_meeting_by_pair.get(&PairKey::new(a, b)).copied()
    }

    pub fn completed_meetings(&self, member_id: &str) -> u32 {
        self.meetings_by_member.get(member_id).copied().unwrap_or(0)
    }

    pub fn acceptance_rate(&self, member_id: &str) -> Option<f64> {
        self.acceptance_by_member.get(member_id).copied()
    }

    pub fn last_met_anyone(&self, member_id: &str) -> Option<DateTime<Utc>> {
        self.last_meeting_by_member.get(member_id).copied()
    }

    pub fn is_active_pair(&self, a: &str, b: &str) -> bool {
        self.active_pairs.contains(&PairKey::new(a, b))
    }
}

/// Aggregate raw history extracts into a [`CycleContext`]
///
/// Empty inputs are valid and yield empty maps; the evaluators treat missing
/// entries as neutral defaults. Meetings that never completed fall back to
/// their creation time when computing "last met".
pub fn build_context(meetings: &[MeetingRecord], responses: &[ResponseRecord]) -> CycleContext {
    let mut ctx = CycleContext::default();

    for meeting in meetings {
        let key = PairKey::new(&meeting.member_a, &meeting.member_b);

        if !meeting.state.is_terminal() {
            ctx.active_pairs.insert(key.clone());
        }

        if meeting.state == crate::models::MeetingState::Closed {
            let met_at = meeting.completed_at.unwrap_or(meeting.created_at);

            ctx.last_meeting_by_pair
                .entry(key)
                .and_modify(|t| *t = (*t).max(met_at))
                .or_insert(met_at);

            for member_id in [&meeting.member_a, &meeting.member_b] {
                *ctx.meetings_by_member.entry(member_id.clone()).or_insert(0) += 1;
                ctx.last_meeting_by_member
                    .entry(member_id.clone())
                    .and_modify(|t| *t = (*t).max(met_at))
                    .or_insert(met_at);
            }
        }
    }

    let mut accepted: HashMap<String, u32> = HashMap::new();
    let mut total: HashMap<String, u32> = HashMap::new();
    for response in responses {
        *total.entry(response.member_id.clone()).or_insert(0) += 1;
        if response.outcome == crate::models::ResponseOutcome::Accepted {
            *accepted.entry(response.member_id.clone()).or_insert(0) += 1;
        }
    }
    for (member_id, count) in total {
        let rate = accepted.get(&member_id).copied().unwrap_or(0) as f64 / count as f64;
        ctx.acceptance_by_member.insert(member_id, rate);
    }

    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MeetingState, ResponseOutcome};
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap()
    }

    fn meeting(
        id: &str,
        a: &str,
        b: &str,
        state: MeetingState,
        created: DateTime<Utc>,
        completed: Option<DateTime<Utc>>,
    ) -> MeetingRecord {
        MeetingRecord {
            meeting_id: id.to_string(),
            member_a: a.to_string(),
            member_b: b.to_string(),
            state,
            created_at: created,
            completed_at: completed,
        }
    }

    fn response(member: &str, outcome: ResponseOutcome) -> ResponseRecord {
        ResponseRecord {
            member_id: member.to_string(),
            outcome,
            responded_at: ts(1),
        }
    }

    #[test]
    fn test_empty_history_is_valid() {
        let ctx = build_context(&[], &[]);
        assert!(ctx.last_meeting_by_pair.is_empty());
        assert!(ctx.active_pairs.is_empty());
        assert_eq!(ctx.completed_meetings("anyone"), 0);
        assert_eq!(ctx.acceptance_rate("anyone"), None);
    }

    #[test]
    fn test_last_meeting_keeps_most_recent() {
        let meetings = vec![
            meeting("1", "a", "b", MeetingState::Closed, ts(1), Some(ts(3))),
            meeting("2", "b", "a", MeetingState::Closed, ts(5), Some(ts(10))),
        ];
        let ctx = build_context(&meetings, &[]);
        assert_eq!(ctx.last_met("a", "b"), Some(ts(10)));
        assert_eq!(ctx.last_met("b", "a"), Some(ts(10)));
    }

    #[test]
    fn test_completion_falls_back_to_creation_time() {
        let meetings = vec![meeting("1", "a", "b", MeetingState::Closed, ts(4), None)];
        let ctx = build_context(&meetings, &[]);
        assert_eq!(ctx.last_met("a", "b"), Some(ts(4)));
    }

    #[test]
    fn test_meeting_counts_per_member() {
        let meetings = vec![
            meeting("1", "a", "b", MeetingState::Closed, ts(1), Some(ts(1))),
            meeting("2", "a", "c", MeetingState::Closed, ts(2), Some(ts(2))),
            meeting("3", "b", "c", MeetingState::Declined, ts(3), None),
        ];
        let ctx = build_context(&meetings, &[]);
        assert_eq!(ctx.completed_meetings("a"), 2);
        assert_eq!(ctx.completed_meetings("b"), 1);
        assert_eq!(ctx.completed_meetings("c"), 1);
    }

    #[test]
    fn test_active_pairs_cover_non_terminal_states() {
        let meetings = vec![
            meeting("1", "a", "b", MeetingState::Suggested, ts(1), None),
            meeting("2", "c", "d", MeetingState::Scheduled, ts(1), None),
            meeting("3", "e", "f", MeetingState::Cancelled, ts(1), None),
        ];
        let ctx = build_context(&meetings, &[]);
        assert!(ctx.is_active_pair("b", "a"));
        assert!(ctx.is_active_pair("c", "d"));
        assert!(!ctx.is_active_pair("e", "f"));
    }

    #[test]
    fn test_acceptance_rates() {
        let responses = vec![
            response("a", ResponseOutcome::Accepted),
            response("a", ResponseOutcome::Declined),
            response("b", ResponseOutcome::Accepted),
            response("c", ResponseOutcome::Expired),
        ];
        let ctx = build_context(&[], &responses);
        assert_eq!(ctx.acceptance_rate("a"), Some(0.5));
        assert_eq!(ctx.acceptance_rate("b"), Some(1.0));
        assert_eq!(ctx.acceptance_rate("c"), Some(0.0));
        assert_eq!(ctx.acceptance_rate("d"), None);
    }
}
