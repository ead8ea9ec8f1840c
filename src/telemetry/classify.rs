//! Threshold classification of derived metrics
//!
//! The decision rule is a plain conjunction of three independent checks.
//! Each check is kept on the result so reports can say which one failed.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::metrics::DerivedMetrics;

/// Tunable constants of the metric chain and the decision rule
///
/// Defaults reproduce the reference behaviour exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationPolicy {
    /// Composite score at or above which a machine can be optimal
    pub min_composite_score: f64,
    /// Inclusive lower bound of the optimal efficiency band
    pub efficiency_min: f64,
    /// Inclusive upper bound of the optimal efficiency band
    pub efficiency_max: f64,
    /// Weight of the operating margin in the composite score
    pub margin_weight: f64,
    /// Weight of the inverted urgency ratio in the composite score
    pub urgency_weight: f64,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self {
            min_composite_score: 75.0,
            efficiency_min: 0.90,
            efficiency_max: 9.90,
            margin_weight: 0.3,
            urgency_weight: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Optimal,
    RequiresMaintenance,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Optimal => f.write_str("Optimal"),
            Status::RequiresMaintenance => f.write_str("Requires Maintenance"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    NoActionNeeded,
    ScheduleMaintenance,
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendedAction::NoActionNeeded => f.write_str("No immediate maintenance required"),
            RecommendedAction::ScheduleMaintenance => f.write_str("Schedule maintenance promptly"),
        }
    }
}

/// Individual outcome of each decision condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionChecks {
    /// composite_score >= min_composite_score
    pub score_ok: bool,
    /// efficiency_ratio within the optimal band
    pub efficiency_ok: bool,
    /// maintenance_urgency_ratio <= maintenance_threshold
    pub urgency_ok: bool,
}

impl ConditionChecks {
    pub fn is_optimal(&self) -> bool {
        self.score_ok && self.efficiency_ok && self.urgency_ok
    }

    /// Names of the conditions that did not hold
    pub fn failed(&self) -> Vec<&'static str> {
        [
            (self.score_ok, "composite score below minimum"),
            (self.efficiency_ok, "efficiency ratio outside optimal band"),
            (self.urgency_ok, "urgency ratio above maintenance threshold"),
        ]
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, name)| name)
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub checks: ConditionChecks,
    pub status: Status,
    pub recommended_action: RecommendedAction,
}

pub fn is_efficiency_optimal(efficiency_ratio: f64, policy: &ClassificationPolicy) -> bool {
    (policy.efficiency_min..=policy.efficiency_max).contains(&efficiency_ratio)
}

/// Apply the decision rule to fully computed metrics
pub fn classify(
    metrics: &DerivedMetrics,
    maintenance_threshold: f64,
    policy: &ClassificationPolicy,
) -> Classification {
    let checks = ConditionChecks {
        score_ok: metrics.composite_score >= policy.min_composite_score,
        efficiency_ok: is_efficiency_optimal(metrics.efficiency_ratio, policy),
        urgency_ok: metrics.maintenance_urgency_ratio <= maintenance_threshold,
    };

    let (status, recommended_action) = if checks.is_optimal() {
        (Status::Optimal, RecommendedAction::NoActionNeeded)
    } else {
        (Status::RequiresMaintenance, RecommendedAction::ScheduleMaintenance)
    };

    Classification {
        checks,
        status,
        recommended_action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(composite_score: f64, efficiency_ratio: f64, urgency: f64) -> DerivedMetrics {
        DerivedMetrics {
            predicted_failure_risk: 10.0,
            maintenance_urgency_ratio: urgency,
            operating_margin: 50.0,
            composite_score,
            efficiency_ratio,
        }
    }

    #[test]
    fn test_all_conditions_met_is_optimal() {
        let result = classify(&metrics(80.0, 5.0, 10.0), 20.0, &Default::default());
        assert_eq!(result.status, Status::Optimal);
        assert_eq!(result.recommended_action, RecommendedAction::NoActionNeeded);
        assert!(result.checks.failed().is_empty());
    }

    #[test]
    fn test_efficiency_band_is_inclusive() {
        let policy = ClassificationPolicy::default();
        for ratio in [0.90, 9.90] {
            let result = classify(&metrics(80.0, ratio, 10.0), 20.0, &policy);
            assert_eq!(result.status, Status::Optimal, "ratio {}", ratio);
        }
        for ratio in [0.89, 9.91] {
            let result = classify(&metrics(80.0, ratio, 10.0), 20.0, &policy);
            assert_eq!(result.status, Status::RequiresMaintenance, "ratio {}", ratio);
            assert!(!result.checks.efficiency_ok);
        }
    }

    #[test]
    fn test_composite_score_boundary() {
        let policy = ClassificationPolicy::default();
        let at = classify(&metrics(75.00, 5.0, 10.0), 20.0, &policy);
        assert!(at.checks.score_ok);
        assert_eq!(at.status, Status::Optimal);

        let below = classify(&metrics(74.99, 5.0, 10.0), 20.0, &policy);
        assert!(!below.checks.score_ok);
        assert_eq!(below.status, Status::RequiresMaintenance);
    }

    #[test]
    fn test_urgency_equal_to_threshold_passes() {
        let result = classify(&metrics(80.0, 5.0, 20.0), 20.0, &Default::default());
        assert!(result.checks.urgency_ok);

        let result = classify(&metrics(80.0, 5.0, 20.01), 20.0, &Default::default());
        assert!(!result.checks.urgency_ok);
        assert_eq!(
            result.recommended_action,
            RecommendedAction::ScheduleMaintenance
        );
    }

    #[test]
    fn test_every_failed_condition_is_reported() {
        let result = classify(&metrics(10.0, 20.0, 90.0), 5.0, &Default::default());
        assert_eq!(result.checks.failed().len(), 3);
    }

    #[test]
    fn test_display_text() {
        assert_eq!(Status::RequiresMaintenance.to_string(), "Requires Maintenance");
        assert_eq!(
            RecommendedAction::ScheduleMaintenance.to_string(),
            "Schedule maintenance promptly"
        );
    }
}
