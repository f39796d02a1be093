//! Impact scorer - ranks goals by cross-goal dependency influence
//!
//! `impact = outgoing * outgoing_weight + incoming * incoming_weight`
//!
//! An outgoing edge means this goal blocks another one, so by default it
//! weighs twice as much as an incoming edge. Weights and display bands come
//! from [`ImpactPolicy`].

use ahash::AHashMap as HashMap;
use goalpulse_domain::{DependencyEdge, Goal, ImpactBand, ImpactPolicy, ImpactResult};
use tracing::debug;

/// Display band for a score
///
/// `score >= high_band_min` is high, `score >= medium_band_min` is medium,
/// anything below is low.
pub fn impact_band(score: u32, policy: &ImpactPolicy) -> ImpactBand {
    if score >= policy.high_band_min {
        ImpactBand::High
    } else if score >= policy.medium_band_min {
        ImpactBand::Medium
    } else {
        ImpactBand::Low
    }
}

/// Score every goal against an edge list
///
/// Returns exactly one result per goal, including goals without edges
/// (score 0). Sorted by descending score; ties keep input order. Parallel
/// edges count individually; edges naming unknown goals are ignored.
pub fn score_impact(
    goals: &[Goal],
    edges: &[DependencyEdge],
    policy: &ImpactPolicy,
) -> Vec<ImpactResult> {
    let mut counts: HashMap<&str, (u32, u32)> =
        goals.iter().map(|g| (g.id.as_str(), (0, 0))).collect();
    let mut dangling = 0usize;

    for edge in edges {
        let mut matched = false;
        if let Some((outgoing, _)) = counts.get_mut(edge.source_goal_id.as_str()) {
            *outgoing += 1;
            matched = true;
        }
        if let Some((_, incoming)) = counts.get_mut(edge.target_goal_id.as_str()) {
            *incoming += 1;
            matched = true;
        }
        if !matched {
            dangling += 1;
        }
    }

    if dangling > 0 {
        debug!(dangling, edge_count = edges.len(), "Ignored dependency edges with unknown goals");
    }

    let mut results: Vec<ImpactResult> = goals
        .iter()
        .map(|goal| {
            let (outgoing_count, incoming_count) =
                counts.get(goal.id.as_str()).copied().unwrap_or_default();
            let impact_score = outgoing_count
                .saturating_mul(policy.outgoing_weight)
                .saturating_add(incoming_count.saturating_mul(policy.incoming_weight));
            ImpactResult {
                goal_id: goal.id.clone(),
                outgoing_count,
                incoming_count,
                impact_score,
                band: impact_band(impact_score, policy),
            }
        })
        .collect();

    results.sort_by(|a, b| b.impact_score.cmp(&a.impact_score));
    results
}
