//! Deviation-based status and risk classification
//!
//! Deviation is `progress - targetProgress`. The bands are:
//!
//! | Status      | Condition                                   |
//! |-------------|---------------------------------------------|
//! | `completed` | `progress >= completed_progress` (first)    |
//! | `on_track`  | `deviation >= 0`                            |
//! | `at_risk`   | `at_risk_min_deviation <= deviation < 0`    |
//! | `delayed`   | `deviation < at_risk_min_deviation`         |
//!
//! | Risk     | Condition                                                 |
//! |----------|-----------------------------------------------------------|
//! | `low`    | `progress >= target * low_risk_min_ratio`                 |
//! | `medium` | `target * medium_risk_min_ratio <= progress < target * low` |
//! | `high`   | `progress < target * medium_risk_min_ratio`               |
//!
//! A stored `status` / `riskLevel` on the goal always takes precedence; the
//! classifier is only consulted when the stored value is absent.

use goalpulse_domain::{ClassifierThresholds, Goal, GoalStatus, RiskLevel};

/// Derive a status from progress and target
pub fn classify_status(
    progress: f64,
    target_progress: f64,
    thresholds: &ClassifierThresholds,
) -> GoalStatus {
    if progress >= thresholds.completed_progress {
        return GoalStatus::Completed;
    }

    let deviation = progress - target_progress;
    if deviation >= 0.0 {
        GoalStatus::OnTrack
    } else if deviation >= thresholds.at_risk_min_deviation {
        GoalStatus::AtRisk
    } else {
        GoalStatus::Delayed
    }
}

/// Derive a risk level from progress and target
pub fn classify_risk(
    progress: f64,
    target_progress: f64,
    thresholds: &ClassifierThresholds,
) -> RiskLevel {
    if progress >= target_progress * thresholds.low_risk_min_ratio {
        RiskLevel::Low
    } else if progress >= target_progress * thresholds.medium_risk_min_ratio {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Stored status, else the derived one
pub fn effective_status(goal: &Goal, thresholds: &ClassifierThresholds) -> GoalStatus {
    goal.status
        .unwrap_or_else(|| classify_status(goal.progress, goal.effective_target(), thresholds))
}

/// Stored risk level, else the derived one
pub fn effective_risk(goal: &Goal, thresholds: &ClassifierThresholds) -> RiskLevel {
    goal.risk_level
        .unwrap_or_else(|| classify_risk(goal.progress, goal.effective_target(), thresholds))
}
