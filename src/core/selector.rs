use crate::core::pair::PairKey;
use crate::models::ScoredPair;
use std::collections::HashSet;

/// Greedy conflict-free selection over scored pairs
///
/// Sorts by total score descending with ties broken lexicographically by
/// canonical pair key, then walks the list accepting a pair only if neither
/// member has been claimed earlier in the cycle. `max_pairs` of 0 means
/// unlimited.
///
/// This is greedy maximal matching by score, not a globally optimal
/// assignment. The trade-off is intentional: O(n log n), fully deterministic,
/// and every accepted pair is explainable by its own breakdown alone.
pub fn select_pairs(mut scored: Vec<ScoredPair>, max_pairs: usize) -> Vec<ScoredPair> {
    scored.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                PairKey::new(&a.member_a, &a.member_b).cmp(&PairKey::new(&b.member_a, &b.member_b))
            })
    });

    let mut claimed: HashSet<String> = HashSet::new();
    let mut accepted = Vec::new();

    for pair in scored {
        if max_pairs > 0 && accepted.len() >= max_pairs {
            break;
        }
        if claimed.contains(&pair.member_a) || claimed.contains(&pair.member_b) {
            continue;
        }
        claimed.insert(pair.member_a.clone());
        claimed.insert(pair.member_b.clone());
        accepted.push(pair);
    }

    accepted
}
