//! Validated goal model
//!
//! These are the types the engine computes over. They are produced from the
//! loosely typed rows in [`super::records`] by [`crate::validation`], so every
//! enum is closed and every progress value is already inside [0, 100].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::constants::DEFAULT_TARGET_PROGRESS;

/* -------------------------------------------------------------------------- */
/* Enumerations */
/* -------------------------------------------------------------------------- */

/// Position of a goal in the organizational cascade
///
/// Declaration order is the cascade order (company first), which is also the
/// ordering used by per-level breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum GoalLevel {
    Company,
    Department,
    Team,
    Individual,
}

impl_domain_status_conversions!(GoalLevel {
    Company => "company",
    Department => "department",
    Team => "team",
    Individual => "individual",
});

/// Goal classification, orthogonal to [`GoalLevel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum GoalType {
    Strategic,
    Operational,
    Project,
    Okr,
}

impl_domain_status_conversions!(GoalType {
    Strategic => "strategic",
    Operational => "operational",
    Project => "project",
    Okr => "okr",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum GoalStatus {
    OnTrack,
    AtRisk,
    Delayed,
    Completed,
}

impl_domain_status_conversions!(GoalStatus {
    OnTrack => "on_track",
    AtRisk => "at_risk",
    Delayed => "delayed",
    Completed => "completed",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl_domain_status_conversions!(RiskLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl_domain_status_conversions!(Trend {
    Up => "up",
    Down => "down",
    Stable => "stable",
});

/// How a key result's current value is collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum MeasurementType {
    Automatic,
    #[default]
    Manual,
}

impl_domain_status_conversions!(MeasurementType {
    Automatic => "automatic",
    Manual => "manual",
});

/* -------------------------------------------------------------------------- */
/* Records */
/* -------------------------------------------------------------------------- */

/// A trackable objective
///
/// `status` and `risk_level` are the stored values. When they are `None` the
/// classifier derives them from progress and target; a stored value always
/// wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub level: GoalLevel,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    /// Current completion in [0, 100]
    pub progress: f64,
    /// Expected completion at this point in time; `None` reads as 100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Target progress with the documented default applied
    pub fn effective_target(&self) -> f64 {
        self.target_progress.unwrap_or(DEFAULT_TARGET_PROGRESS)
    }

    /// Signed distance between current and target progress
    pub fn deviation(&self) -> f64 {
        self.progress - self.effective_target()
    }
}

/// A measurable outcome attached to exactly one goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct KeyResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub goal_id: String,
    pub title: String,
    pub current_value: f64,
    pub target_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub measurement_type: MeasurementType,
}

/// Directed dependency `source -> target`
///
/// The source blocks the target. Parallel edges are counted individually.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct DependencyEdge {
    pub source_goal_id: String,
    pub target_goal_id: String,
}

impl DependencyEdge {
    pub fn new(source_goal_id: impl Into<String>, target_goal_id: impl Into<String>) -> Self {
        Self { source_goal_id: source_goal_id.into(), target_goal_id: target_goal_id.into() }
    }
}

/// One progress review of a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ReviewEvent {
    pub goal_id: String,
    pub review_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_progress: Option<f64>,
    pub new_progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Everything one screen fetches in a single batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSnapshot {
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub key_results: Vec<KeyResult>,
    #[serde(default)]
    pub edges: Vec<DependencyEdge>,
    #[serde(default)]
    pub reviews: Vec<ReviewEvent>,
}

/// A goal plus its resolved children
///
/// Dropping a node tears its subtree down iteratively. Cloning, comparing and
/// serializing still recurse, which is why the hierarchy builder bounds the
/// depth of every forest it returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct GoalNode {
    #[serde(flatten)]
    #[cfg_attr(feature = "ts-gen", ts(flatten))]
    pub goal: Goal,
    pub children: Vec<GoalNode>,
}

impl GoalNode {
    pub fn leaf(goal: Goal) -> Self {
        Self { goal, children: Vec::new() }
    }

    pub fn id(&self) -> &str {
        &self.goal.id
    }
}

impl Drop for GoalNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Pre-filter applied by the snapshot collaborator
///
/// The engine itself is filter-agnostic; filtering a hierarchy by level leaves
/// orphans, which the hierarchy builder promotes to roots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<GoalLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<GoalType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
}

impl GoalFilter {
    /// Whether a goal with these column values passes the filter
    ///
    /// Unset criteria accept anything. A set criterion rejects an absent
    /// value. Department names are compared with surrounding whitespace
    /// ignored.
    pub fn matches_fields(
        &self,
        level: Option<GoalLevel>,
        goal_type: Option<GoalType>,
        department_name: Option<&str>,
    ) -> bool {
        self.level.map_or(true, |wanted| level == Some(wanted))
            && self.goal_type.map_or(true, |wanted| goal_type == Some(wanted))
            && self
                .department_name
                .as_deref()
                .map_or(true, |wanted| department_name.map(str::trim) == Some(wanted.trim()))
    }
}
