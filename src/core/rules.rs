use crate::core::context::CycleContext;
use crate::core::pair::PairKey;
use crate::models::{Member, Rule};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Score returned when a rule has nothing to say about a pair
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Default multiplier applied to the needs-alignment match ratio
const NEEDS_ALIGNMENT_BOOST: f64 = 1.5;

/// Evaluate one rule for one member pair
///
/// Dispatches on the rule key to a pure scoring function. Raw outputs are in
/// [0, 1]; the caller applies the rule weight. An unregistered key returns
/// the neutral score so a misconfigured rule degrades the ranking instead of
/// aborting the cycle.
pub fn evaluate(
    rule: &Rule,
    a: &Member,
    b: &Member,
    ctx: &CycleContext,
    now: DateTime<Utc>,
) -> f64 {
    match rule.rule_key.as_str() {
        "meeting_history" => recency_score(ctx.last_met(&a.member_id, &b.member_id), now),
        "industry_diversity" => diversity_score(a.industry.as_deref(), b.industry.as_deref()),
        "expertise_complementarity" => complementarity_score(&a.expertise, &b.expertise),
        "needs_alignment" => needs_alignment_score(a, b, &rule.config),
        "new_member_priority" => new_member_score(a, b, now),
        "tenure_gap" => tenure_gap_score(a, b, now),
        "load_balance" => load_balance_score(
            ctx.completed_meetings(&a.member_id),
            ctx.completed_meetings(&b.member_id),
        ),
        "responsiveness" => responsiveness_score(
            ctx.acceptance_rate(&a.member_id),
            ctx.acceptance_rate(&b.member_id),
        ),
        "admin_boost" => admin_boost_score(&a.member_id, &b.member_id, &rule.config),
        "recent_meeting_penalty" => {
            recent_penalty_score(ctx.last_met(&a.member_id, &b.member_id), now)
        }
        unknown => {
            tracing::debug!("No evaluator registered for rule '{}', scoring neutral", unknown);
            NEUTRAL_SCORE
        }
    }
}

/// Recency of last meeting: never met scores highest, and the score climbs
/// back up as more time passes. Tiers are half-open on elapsed days.
#[inline]
fn recency_score(last_met: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(met_at) = last_met else {
        return 1.0;
    };
    let days = (now - met_at).num_days();
    if days > 365 {
        0.9
    } else if days > 180 {
        0.7
    } else if days > 90 {
        0.4
    } else if days > 30 {
        0.15
    } else {
        0.0
    }
}

/// Inverse of the recency curve, for use with a negative weight to actively
/// suppress freshly met pairs rather than merely deprioritizing them
#[inline]
fn recent_penalty_score(last_met: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(met_at) = last_met else {
        return 0.0;
    };
    let days = (now - met_at).num_days();
    if days <= 30 {
        1.0
    } else if days <= 90 {
        0.6
    } else if days <= 180 {
        0.25
    } else {
        0.0
    }
}

/// Categorical diversity: cross-industry pairs score highest
#[inline]
fn diversity_score(a: Option<&str>, b: Option<&str>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => {
            if a.eq_ignore_ascii_case(b) {
                0.3
            } else {
                1.0
            }
        }
        _ => NEUTRAL_SCORE,
    }
}

/// Set complementarity: 1 − Jaccard similarity of the two expertise sets, so
/// members with non-overlapping skills score highest
#[inline]
fn complementarity_score(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return NEUTRAL_SCORE;
    }
    let set_a = tag_set(a);
    let set_b = tag_set(b);
    let intersection = set_a.intersection(&set_b).count() as f64;
    let union = set_a.union(&set_b).count() as f64;
    1.0 - intersection / union
}

/// Bidirectional needs alignment: how many of each side's wants the other
/// side offers, boosted and clamped to 1.0
fn needs_alignment_score(a: &Member, b: &Member, config: &serde_json::Value) -> f64 {
    let a_wants = tag_set(&a.looking_for);
    let b_wants = tag_set(&b.looking_for);
    let total_wants = a_wants.len() + b_wants.len();
    if total_wants == 0 {
        return 0.3;
    }

    let a_offers = tag_set(&a.can_help_with);
    let b_offers = tag_set(&b.can_help_with);
    let matched = a_wants.intersection(&b_offers).count() + b_wants.intersection(&a_offers).count();

    let boost = config
        .get("boost")
        .and_then(|v| v.as_f64())
        .unwrap_or(NEEDS_ALIGNMENT_BOOST);

    (matched as f64 / total_wants as f64 * boost).min(1.0)
}

/// New-member priority: tiered on the newest of the two join dates
#[inline]
fn new_member_score(a: &Member, b: &Member, now: DateTime<Utc>) -> f64 {
    let newest = a.tenure_days(now).min(b.tenure_days(now));
    if newest <= 30 {
        1.0
    } else if newest <= 90 {
        0.7
    } else if newest <= 180 {
        0.4
    } else {
        0.0
    }
}

/// Tenure gap: a large difference in membership age suggests a mentorship
/// pairing and scores higher
#[inline]
fn tenure_gap_score(a: &Member, b: &Member, now: DateTime<Utc>) -> f64 {
    let gap = (a.tenure_days(now) - b.tenure_days(now)).abs();
    if gap > 1460 {
        1.0
    } else if gap > 730 {
        0.8
    } else if gap > 365 {
        0.5
    } else if gap > 90 {
        0.2
    } else {
        0.0
    }
}

/// Load balancing: members with few completed meetings rank ahead of the
/// well-connected. Either side at zero takes the max score.
#[inline]
fn load_balance_score(count_a: u32, count_b: u32) -> f64 {
    if count_a == 0 || count_b == 0 {
        return 1.0;
    }
    let min_count = count_a.min(count_b);
    if min_count <= 3 {
        0.75
    } else if min_count <= 8 {
        0.4
    } else {
        0.1
    }
}

/// Responsiveness: mean of both members' acceptance rates. No response
/// history defaults to 1.0 so new members are not penalized.
#[inline]
fn responsiveness_score(rate_a: Option<f64>, rate_b: Option<f64>) -> f64 {
    (rate_a.unwrap_or(1.0) + rate_b.unwrap_or(1.0)) / 2.0
}

/// Operator-forced pairings: config lists explicit pairs, exact unordered
/// match scores 1.0. Malformed config means no boosts, never an error.
fn admin_boost_score(a: &str, b: &str, config: &serde_json::Value) -> f64 {
    let Some(pairs) = config.get("pairs").and_then(|v| v.as_array()) else {
        return 0.0;
    };
    let key = PairKey::new(a, b);
    for entry in pairs {
        let Some(ids) = entry.as_array() else {
            continue;
        };
        let (Some(x), Some(y)) = (
            ids.first().and_then(|v| v.as_str()),
            ids.get(1).and_then(|v| v.as_str()),
        ) else {
            continue;
        };
        if PairKey::new(x, y) == key {
            return 1.0;
        }
    }
    0.0
}

#[inline]
fn tag_set(tags: &[String]) -> HashSet<String> {
    tags.iter().map(|t| t.to_lowercase()).collect()
}
