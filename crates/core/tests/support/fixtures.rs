//! Goal, review and edge builders

use chrono::{DateTime, TimeZone, Utc};
use goalpulse_domain::{
    DependencyEdge, Goal, GoalLevel, GoalRecord, GoalType, ReviewEvent, ReviewEventRecord,
};

/// Midnight UTC on the given day.
pub fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single().expect("valid date")
}

/// Builder for validated goals with sensible defaults.
#[derive(Clone)]
pub struct GoalBuilder {
    goal: Goal,
}

impl GoalBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            goal: Goal {
                id: id.to_string(),
                title: format!("Goal {id}"),
                description: None,
                level: GoalLevel::Team,
                goal_type: GoalType::Okr,
                parent_id: None,
                owner_name: None,
                department_name: None,
                progress: 0.0,
                target_progress: None,
                forecast_progress: None,
                status: None,
                risk_level: None,
                trend: None,
                start_date: None,
                end_date: None,
                created_at: day(2025, 1, 1),
            },
        }
    }

    pub fn level(mut self, level: GoalLevel) -> Self {
        self.goal.level = level;
        self
    }

    pub fn parent(mut self, parent_id: &str) -> Self {
        self.goal.parent_id = Some(parent_id.to_string());
        self
    }

    pub fn progress(mut self, progress: f64) -> Self {
        self.goal.progress = progress;
        self
    }

    pub fn target(mut self, target: f64) -> Self {
        self.goal.target_progress = Some(target);
        self
    }

    pub fn department(mut self, name: &str) -> Self {
        self.goal.department_name = Some(name.to_string());
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.goal.created_at = at;
        self
    }

    pub fn build(self) -> Goal {
        self.goal
    }
}

/// Raw row equivalent of a validated goal, as a repository would return it.
pub fn record_of(goal: &Goal) -> GoalRecord {
    GoalRecord {
        id: Some(goal.id.clone()),
        title: Some(goal.title.clone()),
        level: Some(goal.level.to_string()),
        goal_type: Some(goal.goal_type.to_string()),
        parent_id: goal.parent_id.clone(),
        department_name: goal.department_name.clone(),
        progress: Some(goal.progress),
        target_progress: goal.target_progress,
        status: goal.status.map(|s| s.to_string()),
        risk_level: goal.risk_level.map(|r| r.to_string()),
        created_at: Some(goal.created_at),
        ..Default::default()
    }
}

pub fn review(
    goal_id: &str,
    reviewed: DateTime<Utc>,
    next: Option<DateTime<Utc>>,
    new_progress: f64,
) -> ReviewEvent {
    ReviewEvent {
        goal_id: goal_id.to_string(),
        review_date: reviewed,
        next_review_date: next,
        previous_progress: None,
        new_progress,
        reviewer_name: Some("Quarterly board".to_string()),
        adjustments: None,
        comments: None,
    }
}

pub fn review_record(event: &ReviewEvent) -> ReviewEventRecord {
    ReviewEventRecord {
        goal_id: Some(event.goal_id.clone()),
        review_date: Some(event.review_date),
        next_review_date: event.next_review_date,
        previous_progress: event.previous_progress,
        new_progress: Some(event.new_progress),
        reviewer_name: event.reviewer_name.clone(),
        ..Default::default()
    }
}

pub fn edge(source: &str, target: &str) -> DependencyEdge {
    DependencyEdge::new(source, target)
}
