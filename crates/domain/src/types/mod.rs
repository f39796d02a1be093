//! Domain types and models
//!
//! - [`goal`]: validated goal model and closed enumerations
//! - [`records`]: raw inbound rows
//! - [`insights`]: derived outbound views

pub mod goal;
pub mod insights;
pub mod records;

pub use goal::{
    DependencyEdge, Goal, GoalFilter, GoalLevel, GoalNode, GoalSnapshot, GoalStatus, GoalType,
    KeyResult, MeasurementType, ReviewEvent, RiskLevel, Trend,
};
pub use insights::{
    CriticalGoal, GoalDashboard, ImpactBand, ImpactResult, PendingReview, RollupStats,
};
pub use records::{
    DependencyEdgeRecord, GoalRecord, GoalSnapshotRecord, KeyResultRecord, ReviewEventRecord,
};
