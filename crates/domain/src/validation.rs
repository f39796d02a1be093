//! Record validation
//!
//! Converts raw rows into the validated model. Validation fails fast: the
//! first offending field of the first bad record aborts the whole snapshot,
//! so no caller ever computes over a partially valid collection.
//!
//! Defaults applied here (and only here):
//! - missing `progress` reads as 0
//! - missing key-result values read as 0
//! - missing `measurementType` reads as `manual`
//!
//! A missing `targetProgress` is kept as `None` and resolved by
//! [`crate::Goal::effective_target`].

use std::collections::HashSet;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::constants::{MAX_PROGRESS, MIN_PROGRESS};
use crate::errors::{GoalPulseError, Result};
use crate::types::{
    DependencyEdge, DependencyEdgeRecord, Goal, GoalRecord, GoalSnapshot, GoalSnapshotRecord,
    KeyResult, KeyResultRecord, MeasurementType, ReviewEvent, ReviewEventRecord,
};

const MISSING_ID: &str = "<missing>";

/// Field checks scoped to one record
///
/// Every check returns the cleaned value or an `InvalidRecord` error that
/// names the record kind, its id and the field.
#[derive(Debug, Clone)]
pub struct RecordValidator {
    record: &'static str,
    id: String,
}

impl RecordValidator {
    pub fn new(record: &'static str, id: Option<&str>) -> Self {
        let id = id.filter(|s| !s.trim().is_empty()).unwrap_or(MISSING_ID);
        Self { record, id: id.to_string() }
    }

    pub fn error(&self, field: &str, reason: impl Into<String>) -> GoalPulseError {
        GoalPulseError::invalid_record(self.record, self.id.clone(), field, reason)
    }

    /// Require a value to be present
    pub fn required<T>(&self, field: &str, value: Option<T>) -> Result<T> {
        value.ok_or_else(|| self.error(field, "is required"))
    }

    /// Require a non-blank string; surrounding whitespace is trimmed
    pub fn required_text(&self, field: &str, value: Option<String>) -> Result<String> {
        let value = self.required(field, value)?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(self.error(field, "must not be empty"));
        }
        Ok(trimmed.to_string())
    }

    /// Blank optional strings read as absent
    pub fn optional_text(&self, value: Option<String>) -> Option<String> {
        value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
    }

    /// Check a percentage-like value lies within [0, 100]
    pub fn progress(&self, field: &str, value: f64) -> Result<f64> {
        if !value.is_finite() || !(MIN_PROGRESS..=MAX_PROGRESS).contains(&value) {
            return Err(self.error(field, format!("must be within [0, 100], got {value}")));
        }
        Ok(value)
    }

    pub fn optional_progress(&self, field: &str, value: Option<f64>) -> Result<Option<f64>> {
        value.map(|v| self.progress(field, v)).transpose()
    }

    pub fn non_negative(&self, field: &str, value: f64) -> Result<f64> {
        if !value.is_finite() || value < 0.0 {
            return Err(self.error(field, format!("must be a non-negative number, got {value}")));
        }
        Ok(value)
    }

    /// Parse a closed enumeration from its string form
    pub fn parse_enum<T>(&self, field: &str, value: &str) -> Result<T>
    where
        T: FromStr<Err = String>,
    {
        value.parse::<T>().map_err(|e| self.error(field, e))
    }

    /// Parse an optional enumeration; a blank string reads as absent
    pub fn optional_enum<T>(&self, field: &str, value: Option<&str>) -> Result<Option<T>>
    where
        T: FromStr<Err = String>,
    {
        match value.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => self.parse_enum(field, raw).map(Some),
            None => Ok(None),
        }
    }
}

/// Validate one goal row
///
/// # Errors
/// `InvalidRecord` when `id`, `title`, `level`, `type` or `createdAt` is
/// missing, a progress value is outside [0, 100], or an enum string is not
/// part of its closed set.
pub fn validate_goal(record: GoalRecord) -> Result<Goal> {
    let v = RecordValidator::new("goal", record.id.as_deref());

    let id = v.required_text("id", record.id)?;
    let title = v.required_text("title", record.title)?;
    let level = v.parse_enum("level", &v.required("level", record.level)?)?;
    let goal_type = v.parse_enum("type", &v.required("type", record.goal_type)?)?;
    let created_at = v.required("createdAt", record.created_at)?;

    let progress = match record.progress {
        Some(p) => v.progress("progress", p)?,
        None => {
            debug!(goal_id = %id, "Goal has no progress, defaulting to 0");
            MIN_PROGRESS
        }
    };
    let target_progress = v.optional_progress("targetProgress", record.target_progress)?;
    let forecast_progress = v.optional_progress("forecastProgress", record.forecast_progress)?;

    let status = v.optional_enum("status", record.status.as_deref())?;
    let risk_level = v.optional_enum("riskLevel", record.risk_level.as_deref())?;
    let trend = v.optional_enum("trend", record.trend.as_deref())?;

    if let (Some(start), Some(end)) = (record.start_date, record.end_date) {
        if end < start {
            return Err(v.error("endDate", format!("{end} is before startDate {start}")));
        }
    }

    Ok(Goal {
        parent_id: v.optional_text(record.parent_id),
        description: v.optional_text(record.description),
        owner_name: v.optional_text(record.owner_name),
        department_name: v.optional_text(record.department_name),
        id,
        title,
        level,
        goal_type,
        progress,
        target_progress,
        forecast_progress,
        status,
        risk_level,
        trend,
        start_date: record.start_date,
        end_date: record.end_date,
        created_at,
    })
}

/// Validate one key-result row
///
/// # Errors
/// `InvalidRecord` when `goalId` or `title` is missing, a value is negative,
/// or `measurementType` is unknown.
pub fn validate_key_result(record: KeyResultRecord) -> Result<KeyResult> {
    let v = RecordValidator::new("key_result", record.id.as_deref());

    let goal_id = v.required_text("goalId", record.goal_id)?;
    let title = v.required_text("title", record.title)?;
    let current_value = v.non_negative("currentValue", record.current_value.unwrap_or(0.0))?;
    let target_value = v.non_negative("targetValue", record.target_value.unwrap_or(0.0))?;
    let measurement_type = v
        .optional_enum::<MeasurementType>("measurementType", record.measurement_type.as_deref())?
        .unwrap_or_default();

    Ok(KeyResult {
        id: v.optional_text(record.id),
        goal_id,
        title,
        current_value,
        target_value,
        unit: v.optional_text(record.unit),
        measurement_type,
    })
}

/// Validate one dependency row
///
/// # Errors
/// `InvalidRecord` when either endpoint is missing.
pub fn validate_edge(record: DependencyEdgeRecord) -> Result<DependencyEdge> {
    let v = RecordValidator::new("dependency", record.source_goal_id.as_deref());

    Ok(DependencyEdge {
        source_goal_id: v.required_text("sourceGoalId", record.source_goal_id)?,
        target_goal_id: v.required_text("targetGoalId", record.target_goal_id)?,
    })
}

/// Validate one review row
///
/// # Errors
/// `InvalidRecord` when `goalId`, `reviewDate` or `newProgress` is missing, a
/// progress value is outside [0, 100], or `nextReviewDate` precedes
/// `reviewDate`.
pub fn validate_review(record: ReviewEventRecord) -> Result<ReviewEvent> {
    let v = RecordValidator::new("review", record.goal_id.as_deref());

    let goal_id = v.required_text("goalId", record.goal_id)?;
    let review_date = v.required("reviewDate", record.review_date)?;
    let new_progress = v.progress("newProgress", v.required("newProgress", record.new_progress)?)?;
    let previous_progress = v.optional_progress("previousProgress", record.previous_progress)?;

    if let Some(next) = record.next_review_date {
        if next < review_date {
            return Err(v.error("nextReviewDate", "must not precede reviewDate"));
        }
    }

    Ok(ReviewEvent {
        goal_id,
        review_date,
        next_review_date: record.next_review_date,
        previous_progress,
        new_progress,
        reviewer_name: v.optional_text(record.reviewer_name),
        adjustments: v.optional_text(record.adjustments),
        comments: v.optional_text(record.comments),
    })
}

/// Validate a goal collection and reject duplicate ids
///
/// # Errors
/// The first `InvalidRecord` encountered; a repeated id is reported on the
/// `id` field of the second occurrence.
pub fn validate_goals(records: Vec<GoalRecord>) -> Result<Vec<Goal>> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut goals = Vec::with_capacity(records.len());

    for record in records {
        let goal = validate_goal(record)?;
        if !seen.insert(goal.id.clone()) {
            return Err(GoalPulseError::invalid_record("goal", goal.id, "id", "is duplicated"));
        }
        goals.push(goal);
    }

    Ok(goals)
}

/// Validate every collection of a snapshot
///
/// # Errors
/// The first `InvalidRecord` encountered in any collection.
pub fn validate_snapshot(record: GoalSnapshotRecord) -> Result<GoalSnapshot> {
    let result = validate_collections(record);
    if let Err(err) = &result {
        warn!(error = %err, "Rejected goal snapshot");
    }
    result
}

fn validate_collections(record: GoalSnapshotRecord) -> Result<GoalSnapshot> {
    Ok(GoalSnapshot {
        goals: validate_goals(record.goals)?,
        key_results: record.key_results.into_iter().map(validate_key_result).collect::<Result<_>>()?,
        edges: record.edges.into_iter().map(validate_edge).collect::<Result<_>>()?,
        reviews: record.reviews.into_iter().map(validate_review).collect::<Result<_>>()?,
    })
}
