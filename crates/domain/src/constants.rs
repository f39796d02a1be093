//! Policy constants
//!
//! Centralized defaults for every threshold the engine classifies against.
//! [`crate::config::EngineConfig`] starts from these values and lets callers
//! override them per call.

// Progress domain
pub const MIN_PROGRESS: f64 = 0.0;
pub const MAX_PROGRESS: f64 = 100.0;
/// Target assumed when a goal carries no `targetProgress`
pub const DEFAULT_TARGET_PROGRESS: f64 = 100.0;

// Status bands (deviation = progress - target)
pub const COMPLETED_PROGRESS: f64 = 100.0;
pub const AT_RISK_MIN_DEVIATION: f64 = -10.0;

// Risk bands (progress as a fraction of target)
pub const LOW_RISK_MIN_RATIO: f64 = 0.9;
pub const MEDIUM_RISK_MIN_RATIO: f64 = 0.7;

// Impact scoring
pub const OUTGOING_IMPACT_WEIGHT: u32 = 2;
pub const INCOMING_IMPACT_WEIGHT: u32 = 1;
pub const HIGH_IMPACT_MIN_SCORE: u32 = 5;
pub const MEDIUM_IMPACT_MIN_SCORE: u32 = 2;

// Review scheduling
pub const DEFAULT_REVIEW_CADENCE_DAYS: i64 = 30;
pub const DEFAULT_REVIEW_HORIZON_DAYS: i64 = 14;

// Hierarchy
/// Deepest parent chain a forest may hold (levels, roots count as 1)
pub const DEFAULT_MAX_HIERARCHY_DEPTH: usize = 64;

// Rollup
pub const DEFAULT_CRITICAL_GOAL_LIMIT: usize = 5;
