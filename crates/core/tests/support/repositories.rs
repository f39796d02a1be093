//! Mock repository implementations for testing
//!
//! Provides an in-memory mock of the `GoalRepository` port, enabling
//! deterministic service tests without a storage backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use goalpulse_core::GoalRepository;
use goalpulse_domain::{
    DependencyEdgeRecord, GoalFilter, GoalPulseError, GoalRecord, KeyResultRecord,
    Result as DomainResult, ReviewEventRecord,
};

/// In-memory mock for `GoalRepository`.
///
/// Filters goals by level only; related collections are narrowed to the
/// requested goal ids.
#[derive(Default, Clone)]
pub struct MockGoalRepository {
    goals: Arc<Vec<GoalRecord>>,
    key_results: Arc<Vec<KeyResultRecord>>,
    edges: Arc<Vec<DependencyEdgeRecord>>,
    reviews: Arc<Vec<ReviewEventRecord>>,
    fail_with: Option<String>,
    fetch_calls: Arc<AtomicUsize>,
}

impl MockGoalRepository {
    pub fn new(goals: Vec<GoalRecord>) -> Self {
        Self { goals: Arc::new(goals), ..Default::default() }
    }

    pub fn with_key_results(mut self, key_results: Vec<KeyResultRecord>) -> Self {
        self.key_results = Arc::new(key_results);
        self
    }

    pub fn with_edges(mut self, edges: Vec<DependencyEdgeRecord>) -> Self {
        self.edges = Arc::new(edges);
        self
    }

    pub fn with_reviews(mut self, reviews: Vec<ReviewEventRecord>) -> Self {
        self.reviews = Arc::new(reviews);
        self
    }

    /// Make every fetch fail with a source error.
    pub fn failing(message: &str) -> Self {
        Self { fail_with: Some(message.to_string()), ..Default::default() }
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> DomainResult<()> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(GoalPulseError::Source(message.clone())),
            None => Ok(()),
        }
    }
}

fn owned_by(goal_id: Option<&String>, goal_ids: &[String]) -> bool {
    goal_id.map_or(false, |id| goal_ids.contains(id))
}

#[async_trait]
impl GoalRepository for MockGoalRepository {
    async fn fetch_goals(&self, filter: &GoalFilter) -> DomainResult<Vec<GoalRecord>> {
        self.check()?;
        let level = filter.level.map(|l| l.to_string());
        Ok(self
            .goals
            .iter()
            .filter(|g| level.is_none() || g.level == level)
            .cloned()
            .collect())
    }

    async fn fetch_key_results(&self, goal_ids: &[String]) -> DomainResult<Vec<KeyResultRecord>> {
        self.check()?;
        Ok(self.key_results.iter().filter(|kr| owned_by(kr.goal_id.as_ref(), goal_ids)).cloned().collect())
    }

    async fn fetch_dependency_edges(&self) -> DomainResult<Vec<DependencyEdgeRecord>> {
        self.check()?;
        Ok(self.edges.as_ref().clone())
    }

    async fn fetch_review_events(&self, goal_ids: &[String]) -> DomainResult<Vec<ReviewEventRecord>> {
        self.check()?;
        Ok(self.reviews.iter().filter(|r| owned_by(r.goal_id.as_ref(), goal_ids)).cloned().collect())
    }
}
