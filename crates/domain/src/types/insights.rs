//! Derived views produced by the engine
//!
//! This module centralizes the outbound structures handed to rendering
//! collaborators:
//! - Rollup statistics (flat, per level, per subtree)
//! - Critical goal selection
//! - Dependency impact scores
//! - Pending reviews
//! - The combined dashboard

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::goal::{GoalLevel, GoalNode, GoalStatus, RiskLevel, Trend};

/* -------------------------------------------------------------------------- */
/* Rollup Statistics */
/* -------------------------------------------------------------------------- */

/// Aggregate progress and classification counts over a set of goals
///
/// An empty set is a valid rollup: every number is zero and both maps are
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct RollupStats {
    /// Number of goals folded into this rollup
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub count: usize,

    /// Mean of `progress`; 0 for an empty set
    pub average_progress: f64,

    /// Goals per effective status (stored value, else derived)
    #[cfg_attr(feature = "ts-gen", ts(type = "Partial<Record<GoalStatus, number>>"))]
    pub by_status: BTreeMap<GoalStatus, usize>,

    /// Goals per effective risk level (stored value, else derived)
    #[cfg_attr(feature = "ts-gen", ts(type = "Partial<Record<RiskLevel, number>>"))]
    pub by_risk: BTreeMap<RiskLevel, usize>,

    /// Mean of `progress - targetProgress`; 0 for an empty set
    pub average_deviation: f64,
}

impl RollupStats {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn status_count(&self, status: GoalStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn risk_count(&self, risk: RiskLevel) -> usize {
        self.by_risk.get(&risk).copied().unwrap_or(0)
    }
}

/// A goal selected as furthest behind its target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct CriticalGoal {
    pub goal_id: String,
    pub title: String,
    pub progress: f64,
    pub target_progress: f64,
    /// `progress - targetProgress`; most negative is worst
    pub deviation: f64,
    pub status: GoalStatus,
    pub risk_level: RiskLevel,
}

/* -------------------------------------------------------------------------- */
/* Impact */
/* -------------------------------------------------------------------------- */

/// Display band of an impact score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum ImpactBand {
    Low,
    Medium,
    High,
}

crate::impl_domain_status_conversions!(ImpactBand {
    Low => "low",
    Medium => "medium",
    High => "high",
});

/// Dependency influence of one goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ImpactResult {
    pub goal_id: String,
    /// Edges where this goal is the source (it blocks others)
    pub outgoing_count: u32,
    /// Edges where this goal is the target (it is blocked)
    pub incoming_count: u32,
    pub impact_score: u32,
    pub band: ImpactBand,
}

/* -------------------------------------------------------------------------- */
/* Reviews */
/* -------------------------------------------------------------------------- */

/// A goal whose next review falls inside the lookahead horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct PendingReview {
    pub goal_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    pub next_review_date: DateTime<Utc>,
    /// Date of the most recent review; `None` without history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<DateTime<Utc>>,
    /// `progress - lastReview.newProgress`; `None` without history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_change: Option<f64>,
    /// Whole days from `now` to the due date; negative when overdue
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub days_until_due: i64,
    pub overdue: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

/* -------------------------------------------------------------------------- */
/* Dashboard */
/* -------------------------------------------------------------------------- */

/// Every derived view for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDashboard {
    pub forest: Vec<GoalNode>,
    pub rollup: RollupStats,
    pub by_level: BTreeMap<GoalLevel, RollupStats>,
    /// Rollup of each goal together with all of its descendants
    pub subtree_rollups: HashMap<String, RollupStats>,
    pub critical_goals: Vec<CriticalGoal>,
    /// Mean key-result progress per goal; goals without key results are absent
    pub key_result_progress: HashMap<String, f64>,
    pub impact: Vec<ImpactResult>,
    pub pending_reviews: Vec<PendingReview>,
    pub generated_at: DateTime<Utc>,
}
