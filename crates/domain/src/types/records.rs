//! Raw rows as handed over by the storage collaborator
//!
//! Every field is optional and every enum is a plain string so that a
//! malformed row still deserializes and can be rejected with a precise
//! [`crate::GoalPulseError::InvalidRecord`] instead of an opaque serde error.
//! Unknown columns are ignored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    #[serde(rename = "type")]
    pub goal_type: Option<String>,
    pub parent_id: Option<String>,
    pub owner_name: Option<String>,
    pub department_name: Option<String>,
    pub progress: Option<f64>,
    pub target_progress: Option<f64>,
    pub forecast_progress: Option<f64>,
    pub status: Option<String>,
    pub risk_level: Option<String>,
    pub trend: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyResultRecord {
    pub id: Option<String>,
    pub goal_id: Option<String>,
    pub title: Option<String>,
    pub current_value: Option<f64>,
    pub target_value: Option<f64>,
    pub unit: Option<String>,
    pub measurement_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdgeRecord {
    pub source_goal_id: Option<String>,
    pub target_goal_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEventRecord {
    pub goal_id: Option<String>,
    pub review_date: Option<DateTime<Utc>>,
    pub next_review_date: Option<DateTime<Utc>>,
    pub previous_progress: Option<f64>,
    pub new_progress: Option<f64>,
    pub reviewer_name: Option<String>,
    pub adjustments: Option<String>,
    pub comments: Option<String>,
}

/// Unvalidated counterpart of [`super::GoalSnapshot`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSnapshotRecord {
    #[serde(default)]
    pub goals: Vec<GoalRecord>,
    #[serde(default)]
    pub key_results: Vec<KeyResultRecord>,
    #[serde(default)]
    pub edges: Vec<DependencyEdgeRecord>,
    #[serde(default)]
    pub reviews: Vec<ReviewEventRecord>,
}
