use crate::core::context::CycleContext;
use crate::core::rules::evaluate;
use crate::models::{Member, Rule, RuleScore, ScoredPair};
use chrono::{DateTime, Utc};

/// Score every eligible unordered pair of members
///
/// Pairs already excluded by an in-flight meeting are skipped before any rule
/// runs. The total is the weight-sum of raw rule outputs; individual raws are
/// in [0, 1] but the total is unbounded since weights are signed. Each pair
/// keeps its per-rule breakdown so a ranking can be explained after the fact.
///
/// O(members² × rules); every history lookup is an O(1) read against the
/// pre-built context.
pub fn score_pairs(
    members: &[Member],
    rules: &[Rule],
    ctx: &CycleContext,
    now: DateTime<Utc>,
) -> Vec<ScoredPair> {
    let active_rules: Vec<&Rule> = rules.iter().filter(|r| r.is_active).collect();
    if members.len() < 2 || active_rules.is_empty() {
        return Vec::new();
    }

    let mut scored = Vec::with_capacity(members.len() * (members.len() - 1) / 2);

    for i in 0..members.len() {
        for j in (i + 1)..members.len() {
            let a = &members[i];
            let b = &members[j];

            if ctx.is_active_pair(&a.member_id, &b.member_id) {
                continue;
            }

            let mut total = 0.0;
            let mut breakdown = Vec::with_capacity(active_rules.len());
            for rule in &active_rules {
                let raw = evaluate(rule, a, b, ctx, now);
                let weighted = raw * rule.weight;
                total += weighted;
                breakdown.push(RuleScore {
                    rule_key: rule.rule_key.clone(),
                    raw,
                    weight: rule.weight,
                    weighted,
                });
            }

            scored.push(ScoredPair {
                member_a: a.member_id.clone(),
                member_b: b.member_id.clone(),
                total_score: total,
                breakdown,
            });
        }
    }

    scored
}
