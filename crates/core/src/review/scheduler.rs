//! Review scheduler - next-review dates and the pending-review list
//!
//! The next review of a goal is the `nextReviewDate` of its most recent
//! review. Without one, the goal falls back to `createdAt` plus the default
//! cadence (30 days).
//!
//! A goal is pending when its next review is due on or before the calendar
//! day `now + horizon_days`. Comparing whole days keeps a review due exactly
//! at the horizon inside it, independent of the time of day `now` carries.

use ahash::AHashMap as HashMap;
use chrono::{DateTime, TimeDelta, Utc};
use goalpulse_domain::{Goal, PendingReview, ReviewEvent, ReviewPolicy, Trend};
use tracing::debug;

/// Add whole days, saturating at the representable range
fn add_days(at: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(days).and_then(|delta| at.checked_add_signed(delta)).unwrap_or(
        if days < 0 { DateTime::<Utc>::MIN_UTC } else { DateTime::<Utc>::MAX_UTC },
    )
}

/// Most recent review per goal id
///
/// When two reviews share the latest `reviewDate`, the one later in the input
/// wins.
pub fn latest_reviews(reviews: &[ReviewEvent]) -> HashMap<&str, &ReviewEvent> {
    let mut latest: HashMap<&str, &ReviewEvent> = HashMap::new();
    for review in reviews {
        latest
            .entry(review.goal_id.as_str())
            .and_modify(|current| {
                if review.review_date >= current.review_date {
                    *current = review;
                }
            })
            .or_insert(review);
    }
    latest
}

/// Next review date of a goal given its most recent review
pub fn next_review_date(
    goal: &Goal,
    last_review: Option<&ReviewEvent>,
    policy: &ReviewPolicy,
) -> DateTime<Utc> {
    last_review
        .and_then(|review| review.next_review_date)
        .unwrap_or_else(|| add_days(goal.created_at, policy.default_cadence_days))
}

/// Direction of the last review's progress adjustment
///
/// `None` when the review did not record the previous progress.
pub fn review_trend(review: &ReviewEvent) -> Option<Trend> {
    let previous = review.previous_progress?;
    Some(if review.new_progress > previous {
        Trend::Up
    } else if review.new_progress < previous {
        Trend::Down
    } else {
        Trend::Stable
    })
}

/// Goals whose next review is due within `horizon_days` of `now`
///
/// Non-pending goals are left out. Results are ordered by due date; goals due
/// on the same instant keep input order. Overdue goals are included and
/// flagged.
pub fn pending_reviews(
    goals: &[Goal],
    reviews: &[ReviewEvent],
    horizon_days: i64,
    now: DateTime<Utc>,
    policy: &ReviewPolicy,
) -> Vec<PendingReview> {
    let latest = latest_reviews(reviews);
    let horizon_day = add_days(now, horizon_days).date_naive();
    let today = now.date_naive();

    let mut pending: Vec<PendingReview> = goals
        .iter()
        .filter_map(|goal| {
            let last = latest.get(goal.id.as_str()).copied();
            let due = next_review_date(goal, last, policy);
            if due.date_naive() > horizon_day {
                return None;
            }

            let days_until_due = (due.date_naive() - today).num_days();
            Some(PendingReview {
                goal_id: goal.id.clone(),
                title: goal.title.clone(),
                owner_name: goal.owner_name.clone(),
                next_review_date: due,
                last_review_date: last.map(|r| r.review_date),
                progress_change: last.map(|r| goal.progress - r.new_progress),
                days_until_due,
                overdue: days_until_due < 0,
                trend: goal.trend.or_else(|| last.and_then(review_trend)),
            })
        })
        .collect();

    pending.sort_by_key(|p| p.next_review_date);
    debug!(
        goal_count = goals.len(),
        pending_count = pending.len(),
        horizon_days,
        "Computed pending reviews"
    );
    pending
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use goalpulse_domain::{GoalLevel, GoalType};

    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn goal(id: &str, created_at: DateTime<Utc>, progress: f64) -> Goal {
        Goal {
            id: id.to_string(),
            title: format!("Goal {id}"),
            description: None,
            level: GoalLevel::Individual,
            goal_type: GoalType::Okr,
            parent_id: None,
            owner_name: Some("Dana".to_string()),
            department_name: None,
            progress,
            target_progress: None,
            forecast_progress: None,
            status: None,
            risk_level: None,
            trend: None,
            start_date: None,
            end_date: None,
            created_at,
        }
    }

    fn review(goal_id: &str, date: DateTime<Utc>, next: Option<DateTime<Utc>>, prev: f64, new: f64) -> ReviewEvent {
        ReviewEvent {
            goal_id: goal_id.to_string(),
            review_date: date,
            next_review_date: next,
            previous_progress: Some(prev),
            new_progress: new,
            reviewer_name: Some("Lead".to_string()),
            adjustments: None,
            comments: None,
        }
    }

    #[test]
    fn default_cadence_is_thirty_days_after_creation() {
        let g = goal("g", at(2025, 1, 1), 10.0);
        assert_eq!(next_review_date(&g, None, &ReviewPolicy::default()), at(2025, 1, 31));
    }

    #[test]
    fn latest_review_schedule_wins() {
        let g = goal("g", at(2025, 1, 1), 10.0);
        let reviews = vec![
            review("g", at(2025, 2, 1), Some(at(2025, 3, 1)), 0.0, 5.0),
            review("g", at(2025, 2, 15), Some(at(2025, 2, 20)), 5.0, 8.0),
            review("g", at(2025, 1, 20), Some(at(2025, 9, 1)), 0.0, 2.0),
        ];
        let latest = latest_reviews(&reviews);
        let last = latest.get("g").copied();
        assert_eq!(last.map(|r| r.review_date), Some(at(2025, 2, 15)));
        assert_eq!(next_review_date(&g, last, &ReviewPolicy::default()), at(2025, 2, 20));
    }

    #[test]
    fn review_due_exactly_at_horizon_is_pending() {
        // created 2024-12-16 + 30 days = 2025-01-15 = now + 14 days
        let goals = vec![goal("edge", at(2024, 12, 16), 0.0), goal("later", at(2024, 12, 17), 0.0)];
        let pending = pending_reviews(&goals, &[], 14, at(2025, 1, 1), &ReviewPolicy::default());

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].goal_id, "edge");
        assert_eq!(pending[0].next_review_date, at(2025, 1, 15));
        assert_eq!(pending[0].days_until_due, 14);
    }

    #[test]
    fn boundary_holds_when_now_carries_a_time_of_day() {
        let goals = vec![goal("edge", at(2024, 12, 16), 0.0)];
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 17, 30, 0).unwrap();
        assert_eq!(pending_reviews(&goals, &[], 14, now, &ReviewPolicy::default()).len(), 1);
    }

    #[test]
    fn progress_change_is_absent_without_history() {
        let goals = vec![goal("fresh", at(2024, 12, 1), 30.0)];
        let pending = pending_reviews(&goals, &[], 14, at(2025, 1, 1), &ReviewPolicy::default());
        assert_eq!(pending[0].progress_change, None);
        assert_eq!(pending[0].last_review_date, None);
        assert_eq!(pending[0].trend, None);
        assert!(pending[0].overdue);
    }

    #[test]
    fn progress_change_and_trend_come_from_last_review() {
        let goals = vec![goal("g", at(2024, 10, 1), 45.0)];
        let reviews = vec![review("g", at(2024, 12, 20), Some(at(2025, 1, 5)), 20.0, 40.0)];
        let pending = pending_reviews(&goals, &reviews, 14, at(2025, 1, 1), &ReviewPolicy::default());

        assert_eq!(pending[0].progress_change, Some(5.0));
        assert_eq!(pending[0].trend, Some(Trend::Up));
        assert_eq!(pending[0].days_until_due, 4);
        assert!(!pending[0].overdue);
    }

    #[test]
    fn stored_trend_wins_over_review_trend() {
        let mut g = goal("g", at(2024, 10, 1), 45.0);
        g.trend = Some(Trend::Stable);
        let reviews = vec![review("g", at(2024, 12, 20), Some(at(2025, 1, 5)), 50.0, 40.0)];
        let pending = pending_reviews(&[g], &reviews, 14, at(2025, 1, 1), &ReviewPolicy::default());
        assert_eq!(pending[0].trend, Some(Trend::Stable));
    }

    #[test]
    fn results_are_ordered_by_due_date() {
        let goals = vec![goal("b", at(2024, 12, 10), 0.0), goal("a", at(2024, 12, 1), 0.0)];
        let pending = pending_reviews(&goals, &[], 30, at(2025, 1, 1), &ReviewPolicy::default());
        let ids: Vec<&str> = pending.iter().map(|p| p.goal_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn huge_horizon_saturates() {
        let goals = vec![goal("g", at(2025, 1, 1), 0.0)];
        let pending = pending_reviews(&goals, &[], i64::MAX, at(2025, 1, 1), &ReviewPolicy::default());
        assert_eq!(pending.len(), 1);
    }
}
