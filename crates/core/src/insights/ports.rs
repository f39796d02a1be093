//! Port interfaces for the storage collaborator
//!
//! The engine never talks to storage itself. These traits describe the
//! read-only fetches a screen performs before handing the rows to the engine;
//! mutations (archive, restore, delete, status changes) stay with the caller.

use async_trait::async_trait;
use goalpulse_domain::{
    DependencyEdgeRecord, GoalFilter, GoalRecord, KeyResultRecord, Result, ReviewEventRecord,
};

/// Read access to goal rows and their related entities
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Fetch every goal matching the filter
    async fn fetch_goals(&self, filter: &GoalFilter) -> Result<Vec<GoalRecord>>;

    /// Fetch the key results belonging to the given goals
    async fn fetch_key_results(&self, goal_ids: &[String]) -> Result<Vec<KeyResultRecord>>;

    /// Fetch every dependency edge
    ///
    /// Edges may reference goals outside the current filter; the impact scorer
    /// ignores those endpoints.
    async fn fetch_dependency_edges(&self) -> Result<Vec<DependencyEdgeRecord>>;

    /// Fetch the review history of the given goals
    async fn fetch_review_events(&self, goal_ids: &[String]) -> Result<Vec<ReviewEventRecord>>;
}
