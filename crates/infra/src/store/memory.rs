//! In-memory goal store
//!
//! Holds one raw snapshot behind a lock and serves it through the
//! [`GoalRepository`] port. Rows are returned unvalidated so that the
//! insights service applies the same validation it applies to any other
//! source. Snapshots can be seeded from JSON exports.

use std::path::Path;

use ahash::AHashSet as HashSet;
use async_trait::async_trait;
use goalpulse_core::GoalRepository;
use goalpulse_domain::{
    DependencyEdgeRecord, GoalFilter, GoalLevel, GoalPulseError, GoalRecord, GoalSnapshotRecord,
    GoalType, KeyResultRecord, Result, ReviewEventRecord,
};
use parking_lot::RwLock;
use tracing::{debug, info};

/// Thread-safe in-memory implementation of [`GoalRepository`]
#[derive(Debug, Default)]
pub struct InMemoryGoalStore {
    snapshot: RwLock<GoalSnapshotRecord>,
}

impl InMemoryGoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: GoalSnapshotRecord) -> Self {
        Self { snapshot: RwLock::new(snapshot) }
    }

    /// Parse a snapshot export (`{"goals": [...], "keyResults": [...], ...}`)
    ///
    /// # Errors
    /// `Source` when the document is not a snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: GoalSnapshotRecord = serde_json::from_str(json)
            .map_err(|e| GoalPulseError::Source(format!("Invalid snapshot JSON: {e}")))?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Read a snapshot export from disk
    ///
    /// # Errors
    /// `Source` when the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GoalPulseError::Source(format!("Failed to read snapshot {}: {e}", path.display()))
        })?;
        let store = Self::from_json(&contents)?;
        info!(path = %path.display(), goal_count = store.goal_count(), "Loaded goal snapshot");
        Ok(store)
    }

    /// Swap in a new snapshot; readers see either the old or the new one
    pub fn replace(&self, snapshot: GoalSnapshotRecord) {
        *self.snapshot.write() = snapshot;
    }

    pub fn goal_count(&self) -> usize {
        self.snapshot.read().goals.len()
    }
}

/// Whether a raw goal row passes the filter
///
/// Enum columns are parsed before [`GoalFilter::matches_fields`] compares
/// them, so `"Company"` matches `GoalLevel::Company`. Rows whose column does
/// not parse never match a filter on that column; validation rejects them
/// later when unfiltered.
fn row_matches(filter: &GoalFilter, row: &GoalRecord) -> bool {
    filter.matches_fields(
        row.level.as_deref().and_then(|s| s.parse::<GoalLevel>().ok()),
        row.goal_type.as_deref().and_then(|s| s.parse::<GoalType>().ok()),
        row.department_name.as_deref(),
    )
}

fn id_set(goal_ids: &[String]) -> HashSet<&str> {
    goal_ids.iter().map(String::as_str).collect()
}

#[async_trait]
impl GoalRepository for InMemoryGoalStore {
    async fn fetch_goals(&self, filter: &GoalFilter) -> Result<Vec<GoalRecord>> {
        let snapshot = self.snapshot.read();
        let goals: Vec<GoalRecord> =
            snapshot.goals.iter().filter(|row| row_matches(filter, row)).cloned().collect();
        debug!(total = snapshot.goals.len(), matched = goals.len(), "Fetched goals");
        Ok(goals)
    }

    async fn fetch_key_results(&self, goal_ids: &[String]) -> Result<Vec<KeyResultRecord>> {
        let wanted = id_set(goal_ids);
        Ok(self
            .snapshot
            .read()
            .key_results
            .iter()
            .filter(|kr| kr.goal_id.as_deref().is_some_and(|id| wanted.contains(id)))
            .cloned()
            .collect())
    }

    async fn fetch_dependency_edges(&self) -> Result<Vec<DependencyEdgeRecord>> {
        Ok(self.snapshot.read().edges.clone())
    }

    async fn fetch_review_events(&self, goal_ids: &[String]) -> Result<Vec<ReviewEventRecord>> {
        let wanted = id_set(goal_ids);
        Ok(self
            .snapshot
            .read()
            .reviews
            .iter()
            .filter(|review| review.goal_id.as_deref().is_some_and(|id| wanted.contains(id)))
            .cloned()
            .collect())
    }
}
