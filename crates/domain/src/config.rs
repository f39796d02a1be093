//! Engine configuration
//!
//! [`EngineConfig`] is the explicit parameter object every engine entry point
//! receives. Nothing in the engine reads ambient state; tuning a threshold
//! means passing a different config.

use serde::{Deserialize, Serialize};

use crate::constants::{
    AT_RISK_MIN_DEVIATION, COMPLETED_PROGRESS, DEFAULT_CRITICAL_GOAL_LIMIT,
    DEFAULT_MAX_HIERARCHY_DEPTH,
    DEFAULT_REVIEW_CADENCE_DAYS, DEFAULT_REVIEW_HORIZON_DAYS, HIGH_IMPACT_MIN_SCORE,
    INCOMING_IMPACT_WEIGHT, LOW_RISK_MIN_RATIO, MAX_PROGRESS, MEDIUM_IMPACT_MIN_SCORE,
    MEDIUM_RISK_MIN_RATIO, MIN_PROGRESS, OUTGOING_IMPACT_WEIGHT,
};
use crate::errors::{GoalPulseError, Result};

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub classifier: ClassifierThresholds,
    pub hierarchy: HierarchyPolicy,
    pub impact: ImpactPolicy,
    pub review: ReviewPolicy,
    pub rollup: RollupPolicy,
}

/// Status and risk band thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// Progress at or above which a goal is completed (default: 100)
    pub completed_progress: f64,

    /// Lowest deviation still classified as at risk (default: -10)
    pub at_risk_min_deviation: f64,

    /// Progress/target ratio at or above which risk is low (default: 0.9)
    pub low_risk_min_ratio: f64,

    /// Progress/target ratio at or above which risk is medium (default: 0.7)
    pub medium_risk_min_ratio: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            completed_progress: COMPLETED_PROGRESS,
            at_risk_min_deviation: AT_RISK_MIN_DEVIATION,
            low_risk_min_ratio: LOW_RISK_MIN_RATIO,
            medium_risk_min_ratio: MEDIUM_RISK_MIN_RATIO,
        }
    }
}

/// Dependency impact weighting and display bands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactPolicy {
    /// Weight of an edge this goal is the source of (default: 2)
    pub outgoing_weight: u32,

    /// Weight of an edge this goal is the target of (default: 1)
    pub incoming_weight: u32,

    /// Minimum score of the high band (default: 5)
    pub high_band_min: u32,

    /// Minimum score of the medium band (default: 2)
    pub medium_band_min: u32,
}

impl Default for ImpactPolicy {
    fn default() -> Self {
        Self {
            outgoing_weight: OUTGOING_IMPACT_WEIGHT,
            incoming_weight: INCOMING_IMPACT_WEIGHT,
            high_band_min: HIGH_IMPACT_MIN_SCORE,
            medium_band_min: MEDIUM_IMPACT_MIN_SCORE,
        }
    }
}

/// Review cadence and lookahead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewPolicy {
    /// Days after `createdAt` of the first review (default: 30)
    pub default_cadence_days: i64,

    /// Lookahead used by the dashboard (default: 14)
    pub horizon_days: i64,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            default_cadence_days: DEFAULT_REVIEW_CADENCE_DAYS,
            horizon_days: DEFAULT_REVIEW_HORIZON_DAYS,
        }
    }
}

/// Limits on the shape of a built forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyPolicy {
    /// Deepest parent chain accepted, in levels (default: 64)
    pub max_depth: usize,
}

impl Default for HierarchyPolicy {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_HIERARCHY_DEPTH }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollupPolicy {
    /// Number of goals returned by critical-goal selection (default: 5)
    pub critical_goal_limit: usize,
}

impl Default for RollupPolicy {
    fn default() -> Self {
        Self { critical_goal_limit: DEFAULT_CRITICAL_GOAL_LIMIT }
    }
}

impl EngineConfig {
    /// Reject policies the algorithms cannot apply consistently
    ///
    /// # Errors
    /// Returns `GoalPulseError::Config` naming the first incoherent setting.
    pub fn validate(&self) -> Result<()> {
        let c = &self.classifier;
        if !(MIN_PROGRESS..=MAX_PROGRESS).contains(&c.completed_progress) {
            return Err(config_error("classifier.completed_progress must be within [0, 100]"));
        }
        if !c.at_risk_min_deviation.is_finite() || c.at_risk_min_deviation > 0.0 {
            return Err(config_error("classifier.at_risk_min_deviation must be <= 0"));
        }
        if !(c.medium_risk_min_ratio > 0.0
            && c.medium_risk_min_ratio <= c.low_risk_min_ratio
            && c.low_risk_min_ratio <= 1.0)
        {
            return Err(config_error(
                "classifier risk ratios must satisfy 0 < medium_risk_min_ratio <= low_risk_min_ratio <= 1",
            ));
        }

        if self.hierarchy.max_depth == 0 {
            return Err(config_error("hierarchy.max_depth must be at least 1"));
        }

        let i = &self.impact;
        if i.medium_band_min > i.high_band_min {
            return Err(config_error("impact.medium_band_min must not exceed impact.high_band_min"));
        }

        let r = &self.review;
        if r.default_cadence_days <= 0 {
            return Err(config_error("review.default_cadence_days must be positive"));
        }
        if r.horizon_days < 0 {
            return Err(config_error("review.horizon_days must not be negative"));
        }

        Ok(())
    }
}

fn config_error(message: &str) -> GoalPulseError {
    GoalPulseError::Config(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.classifier.at_risk_min_deviation, -10.0);
        assert_eq!(config.impact.outgoing_weight, 2);
        assert_eq!(config.impact.incoming_weight, 1);
        assert_eq!(config.review.default_cadence_days, 30);
        assert_eq!(config.rollup.critical_goal_limit, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"impact": {"outgoing_weight": 3}}"#).unwrap();
        assert_eq!(config.impact.outgoing_weight, 3);
        assert_eq!(config.impact.incoming_weight, 1);
        assert_eq!(config.review, ReviewPolicy::default());
    }

    #[test]
    fn rejects_inverted_risk_ratios() {
        let mut config = EngineConfig::default();
        config.classifier.medium_risk_min_ratio = 0.95;
        assert!(matches!(config.validate(), Err(GoalPulseError::Config(_))));
    }

    #[test]
    fn rejects_zero_hierarchy_depth() {
        let mut config = EngineConfig::default();
        assert_eq!(config.hierarchy.max_depth, 64);
        config.hierarchy.max_depth = 0;
        assert!(matches!(config.validate(), Err(GoalPulseError::Config(_))));
    }

    #[test]
    fn rejects_inverted_impact_bands() {
        let mut config = EngineConfig::default();
        config.impact.medium_band_min = 6;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_cadence_and_negative_horizon() {
        let mut config = EngineConfig::default();
        config.review.default_cadence_days = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.review.horizon_days = -1;
        assert!(config.validate().is_err());
    }
}
