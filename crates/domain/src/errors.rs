//! Error types used throughout the engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for GoalPulse
///
/// Only [`GoalPulseError::CyclicHierarchy`],
/// [`GoalPulseError::HierarchyTooDeep`] and [`GoalPulseError::InvalidRecord`]
/// describe the goal data itself. Empty
/// collections, childless goals, missing edges and missing review history are
/// valid inputs and never produce an error.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum GoalPulseError {
    /// A goal is transitively its own ancestor.
    #[error("Cyclic goal hierarchy involving: {}", goal_ids.join(", "))]
    CyclicHierarchy { goal_ids: Vec<String> },

    /// A parent chain is longer than the configured hierarchy depth.
    #[error("Goal '{goal_id}' is nested deeper than {max_depth} levels")]
    HierarchyTooDeep { goal_id: String, max_depth: usize },

    /// A record is missing a required field or carries a value outside its
    /// documented domain.
    #[error("Invalid {record} record '{id}': field `{field}` {reason}")]
    InvalidRecord { record: String, id: String, field: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    /// The snapshot collaborator could not provide records.
    #[error("Snapshot source error: {0}")]
    Source(String),
}

impl GoalPulseError {
    /// Build an [`GoalPulseError::InvalidRecord`] error.
    pub fn invalid_record(
        record: impl Into<String>,
        id: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRecord {
            record: record.into(),
            id: id.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True when the error was caused by malformed goal data rather than by
    /// configuration or the snapshot collaborator.
    ///
    /// UI callers use this to decide between a "partial data" banner and a
    /// generic failure message.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::CyclicHierarchy { .. }
                | Self::HierarchyTooDeep { .. }
                | Self::InvalidRecord { .. }
        )
    }
}

/// Result type alias for GoalPulse operations
pub type Result<T> = std::result::Result<T, GoalPulseError>;
