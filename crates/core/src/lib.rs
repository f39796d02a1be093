//! # GoalPulse Core
//!
//! Pure goal analytics - no infrastructure dependencies.
//!
//! This crate contains:
//! - Hierarchy builder (flat list to parent/child forest)
//! - Rollup calculator (progress, deviation, status/risk counts)
//! - Impact scorer (dependency-weighted ranking)
//! - Review scheduler (next review dates, pending reviews)
//! - Status/risk classifier shared by all of the above
//! - The repository port and the insights service composing the engine
//!
//! ## Architecture Principles
//! - Only depends on `goalpulse-domain`
//! - Every engine function is a synchronous, pure function of its inputs and
//!   is safe to call from any number of threads at once
//! - All external dependencies via traits

pub mod classification;
pub mod hierarchy;
pub mod impact;
pub mod insights;
pub mod review;
pub mod rollup;

// Re-export specific items to avoid ambiguity
pub use classification::{classify_risk, classify_status, effective_risk, effective_status};
pub use hierarchy::{
    ancestors_of, build_forest, build_forest_bounded, count_nodes, depth_first, ensure_acyclic,
    max_depth,
};
pub use impact::{impact_band, score_impact};
pub use insights::{build_dashboard, GoalInsightsService, GoalRepository};
pub use review::{next_review_date, pending_reviews};
pub use rollup::{
    aggregate, aggregate_by_level, critical_goals, key_result_progress, key_result_progress_by_goal,
    progress_from_key_results,
    rollup, subtree_rollups,
};
