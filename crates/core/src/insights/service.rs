//! Goal insights service - core business logic
//!
//! Fetches one snapshot through [`GoalRepository`], validates it, and runs
//! every engine component over it. The computation itself lives in
//! [`build_dashboard`], which is pure and usable without a repository.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use goalpulse_domain::{
    validate_snapshot, EngineConfig, GoalDashboard, GoalFilter, GoalSnapshot, GoalSnapshotRecord,
    Result,
};
use tracing::{debug, info, warn};

use super::ports::GoalRepository;
use crate::hierarchy::build_forest_bounded;
use crate::impact::score_impact;
use crate::review::pending_reviews;
use crate::rollup::{
    aggregate, aggregate_by_level, critical_goals, key_result_progress_by_goal, subtree_rollups,
};

/// Compute every derived view of a validated snapshot
///
/// # Errors
/// `CyclicHierarchy`, `HierarchyTooDeep` (beyond `config.hierarchy`) or
/// `InvalidRecord` (duplicate ids) from the hierarchy builder. Nothing is
/// returned on error.
pub fn build_dashboard(
    snapshot: &GoalSnapshot,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> Result<GoalDashboard> {
    let thresholds = &config.classifier;
    let goals = &snapshot.goals;

    let forest = build_forest_bounded(goals, config.hierarchy.max_depth)?;
    let subtree_rollups = subtree_rollups(&forest, thresholds)?;

    let progress_by_goal = key_result_progress_by_goal(&snapshot.key_results);
    let key_result_progress = goals
        .iter()
        .filter_map(|goal| {
            progress_by_goal.get(goal.id.as_str()).map(|&progress| (goal.id.clone(), progress))
        })
        .collect();

    Ok(GoalDashboard {
        rollup: aggregate(goals, thresholds),
        by_level: aggregate_by_level(goals, thresholds),
        critical_goals: critical_goals(goals, config.rollup.critical_goal_limit, thresholds),
        impact: score_impact(goals, &snapshot.edges, &config.impact),
        pending_reviews: pending_reviews(
            goals,
            &snapshot.reviews,
            config.review.horizon_days,
            now,
            &config.review,
        ),
        forest,
        subtree_rollups,
        key_result_progress,
        generated_at: now,
    })
}

/// Goal insights service
pub struct GoalInsightsService {
    repository: Arc<dyn GoalRepository>,
    config: EngineConfig,
}

impl GoalInsightsService {
    /// Create a new insights service with the default policy
    pub fn new(repository: Arc<dyn GoalRepository>) -> Self {
        Self { repository, config: EngineConfig::default() }
    }

    /// Replace the engine policy
    ///
    /// # Errors
    /// `Config` when the policy is incoherent.
    pub fn with_config(mut self, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fetch and validate one snapshot
    ///
    /// Related collections are fetched for the goals that survived the
    /// filter only.
    pub async fn load_snapshot(&self, filter: &GoalFilter) -> Result<GoalSnapshot> {
        let goals = self.repository.fetch_goals(filter).await?;
        let goal_ids: Vec<String> = goals.iter().filter_map(|g| g.id.clone()).collect();

        let record = GoalSnapshotRecord {
            key_results: self.repository.fetch_key_results(&goal_ids).await?,
            edges: self.repository.fetch_dependency_edges().await?,
            reviews: self.repository.fetch_review_events(&goal_ids).await?,
            goals,
        };
        debug!(
            goal_count = record.goals.len(),
            key_result_count = record.key_results.len(),
            edge_count = record.edges.len(),
            review_count = record.reviews.len(),
            "Fetched goal snapshot"
        );

        validate_snapshot(record)
    }

    /// Fetch a snapshot and compute every derived view
    pub async fn dashboard(&self, filter: &GoalFilter, now: DateTime<Utc>) -> Result<GoalDashboard> {
        let snapshot = self.load_snapshot(filter).await?;

        match build_dashboard(&snapshot, &self.config, now) {
            Ok(dashboard) => {
                info!(
                    goal_count = snapshot.goals.len(),
                    root_count = dashboard.forest.len(),
                    pending_reviews = dashboard.pending_reviews.len(),
                    "Built goal dashboard"
                );
                Ok(dashboard)
            }
            Err(err) => {
                warn!(error = %err, "Failed to build goal dashboard");
                Err(err)
            }
        }
    }
}
