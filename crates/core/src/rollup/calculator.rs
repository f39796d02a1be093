//! Rollup calculator - aggregate progress, deviation and classification counts
//!
//! Two entry points share one accumulator:
//! - [`aggregate`] folds a flat goal list
//! - [`rollup`] folds every node of a forest (each node together with all of
//!   its descendants)
//!
//! Level and type filtering is the caller's job; pre-filter the input.
//! Goals without `targetProgress` are measured against 100.

use std::collections::{BTreeMap, HashMap};

use goalpulse_domain::{
    ClassifierThresholds, CriticalGoal, Goal, GoalLevel, GoalNode, GoalStatus, Result, RiskLevel,
    RollupStats,
};
use tracing::debug;

use crate::classification::{effective_risk, effective_status};
use crate::hierarchy::depth_first;

/// Running sums behind a [`RollupStats`]
///
/// Keeping sums instead of averages lets subtree rollups merge without
/// accumulating rounding error.
#[derive(Debug, Clone, Default)]
pub struct RollupAccumulator {
    count: usize,
    progress_sum: f64,
    deviation_sum: f64,
    by_status: BTreeMap<GoalStatus, usize>,
    by_risk: BTreeMap<RiskLevel, usize>,
}

impl RollupAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, goal: &Goal, thresholds: &ClassifierThresholds) {
        self.count += 1;
        self.progress_sum += goal.progress;
        self.deviation_sum += goal.deviation();
        *self.by_status.entry(effective_status(goal, thresholds)).or_insert(0) += 1;
        *self.by_risk.entry(effective_risk(goal, thresholds)).or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: &RollupAccumulator) {
        self.count += other.count;
        self.progress_sum += other.progress_sum;
        self.deviation_sum += other.deviation_sum;
        for (status, n) in &other.by_status {
            *self.by_status.entry(*status).or_insert(0) += n;
        }
        for (risk, n) in &other.by_risk {
            *self.by_risk.entry(*risk).or_insert(0) += n;
        }
    }

    pub fn finish(&self) -> RollupStats {
        if self.count == 0 {
            return RollupStats::default();
        }

        let n = self.count as f64;
        RollupStats {
            count: self.count,
            average_progress: self.progress_sum / n,
            by_status: self.by_status.clone(),
            by_risk: self.by_risk.clone(),
            average_deviation: self.deviation_sum / n,
        }
    }
}

/// Aggregate a flat goal collection
///
/// An empty collection yields the zero rollup.
pub fn aggregate(goals: &[Goal], thresholds: &ClassifierThresholds) -> RollupStats {
    let mut acc = RollupAccumulator::new();
    for goal in goals {
        acc.add(goal, thresholds);
    }
    acc.finish()
}

/// One rollup per level present in the collection, in cascade order
pub fn aggregate_by_level(
    goals: &[Goal],
    thresholds: &ClassifierThresholds,
) -> BTreeMap<GoalLevel, RollupStats> {
    let mut by_level: BTreeMap<GoalLevel, RollupAccumulator> = BTreeMap::new();
    for goal in goals {
        by_level.entry(goal.level).or_default().add(goal, thresholds);
    }
    by_level.into_iter().map(|(level, acc)| (level, acc.finish())).collect()
}

/// Aggregate every node of a forest
///
/// # Errors
/// `CyclicHierarchy` when the same goal id is reachable twice.
pub fn rollup(forest: &[GoalNode], thresholds: &ClassifierThresholds) -> Result<RollupStats> {
    let mut acc = RollupAccumulator::new();
    for (node, _) in depth_first(forest)? {
        acc.add(&node.goal, thresholds);
    }
    Ok(acc.finish())
}

/// Rollup of each node together with all of its descendants, keyed by id
///
/// Leaves roll up to their own goal only.
///
/// # Errors
/// `CyclicHierarchy` when the same goal id is reachable twice.
pub fn subtree_rollups(
    forest: &[GoalNode],
    thresholds: &ClassifierThresholds,
) -> Result<HashMap<String, RollupStats>> {
    let walk = depth_first(forest)?;
    let mut accumulators: HashMap<&str, RollupAccumulator> = HashMap::with_capacity(walk.len());

    // Reverse pre-order visits every child before its parent.
    for (node, _) in walk.iter().rev() {
        let mut acc = RollupAccumulator::new();
        acc.add(&node.goal, thresholds);
        for child in &node.children {
            if let Some(child_acc) = accumulators.get(child.id()) {
                acc.merge(child_acc);
            }
        }
        accumulators.insert(node.id(), acc);
    }

    debug!(node_count = accumulators.len(), "Computed subtree rollups");
    Ok(accumulators.into_iter().map(|(id, acc)| (id.to_string(), acc.finish())).collect())
}

/// The `limit` goals furthest behind their target
///
/// Sorted ascending by deviation (most negative first). The sort is stable,
/// so ties keep input order.
pub fn critical_goals(
    goals: &[Goal],
    limit: usize,
    thresholds: &ClassifierThresholds,
) -> Vec<CriticalGoal> {
    let mut ranked: Vec<&Goal> = goals.iter().collect();
    ranked.sort_by(|a, b| a.deviation().total_cmp(&b.deviation()));

    ranked
        .into_iter()
        .take(limit)
        .map(|goal| CriticalGoal {
            goal_id: goal.id.clone(),
            title: goal.title.clone(),
            progress: goal.progress,
            target_progress: goal.effective_target(),
            deviation: goal.deviation(),
            status: effective_status(goal, thresholds),
            risk_level: effective_risk(goal, thresholds),
        })
        .collect()
}
