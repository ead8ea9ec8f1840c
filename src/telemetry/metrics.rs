//! Pure derivation of the maintenance metric chain
//!
//! The five metrics are computed in a fixed order. Each one is rounded to
//! [`PRECISION`] decimal places before it feeds the next step, so results
//! match reference output digit for digit.

use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use super::classify::ClassificationPolicy;
use super::record::MachineRecord;

/// Decimal places kept after every step
pub const PRECISION: usize = 2;

/// Round the exact binary value to [`PRECISION`] places, ties to even
///
/// Goes through decimal formatting so no intermediate product can create a
/// tie the stored value does not have (`0.25 * 0.3` is just below 0.075).
pub fn round2(value: f64) -> f64 {
    format!("{:.*}", PRECISION, value)
        .parse::<f64>()
        .unwrap_or(value)
}

/// A record whose metrics cannot be computed
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComputationError {
    #[error("Machine {machine_id} (row {row}): predicted failure risk rounds to zero; urgency and efficiency ratios are undefined")]
    ZeroFailureRisk { machine_id: String, row: usize },

    #[error("Machine {machine_id} (row {row}): runtime_hours must be positive to compute the urgency ratio")]
    NonPositiveRuntime { machine_id: String, row: usize },

    #[error("Machine {machine_id} (row {row}): max_operating_hours must be positive to compute the operating margin")]
    NonPositiveMaxHours { machine_id: String, row: usize },

    #[error("Machine {machine_id} (row {row}): {metric} is not a finite number")]
    NonFinite {
        machine_id: String,
        row: usize,
        metric: &'static str,
    },
}

impl ComputationError {
    pub fn row(&self) -> usize {
        match self {
            Self::ZeroFailureRisk { row, .. }
            | Self::NonPositiveRuntime { row, .. }
            | Self::NonPositiveMaxHours { row, .. }
            | Self::NonFinite { row, .. } => *row,
        }
    }

    pub fn machine_id(&self) -> &str {
        match self {
            Self::ZeroFailureRisk { machine_id, .. }
            | Self::NonPositiveRuntime { machine_id, .. }
            | Self::NonPositiveMaxHours { machine_id, .. }
            | Self::NonFinite { machine_id, .. } => machine_id,
        }
    }
}

/// The five derived values, each already rounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub predicted_failure_risk: f64,
    pub maintenance_urgency_ratio: f64,
    pub operating_margin: f64,
    pub composite_score: f64,
    pub efficiency_ratio: f64,
}

pub fn predicted_failure_risk(vibration_level: f64, scaling_factor: f64) -> f64 {
    round2(vibration_level * scaling_factor)
}

pub fn maintenance_urgency_ratio(predicted_failure_risk: f64, runtime_hours: f64) -> f64 {
    round2((predicted_failure_risk / runtime_hours) * 100.0)
}

pub fn operating_margin(max_operating_hours: f64, runtime_hours: f64) -> f64 {
    round2(((max_operating_hours - runtime_hours) / max_operating_hours) * 100.0)
}

pub fn composite_score(
    operating_margin: f64,
    maintenance_urgency_ratio: f64,
    policy: &ClassificationPolicy,
) -> f64 {
    round2(
        (operating_margin * policy.margin_weight)
            + ((100.0 - maintenance_urgency_ratio) * policy.urgency_weight),
    )
}

pub fn efficiency_ratio(runtime_hours: f64, predicted_failure_risk: f64) -> f64 {
    round2(runtime_hours / predicted_failure_risk)
}

/// Run the metric chain for one record
///
/// Divisors are re-checked here even though validation already guarantees
/// them, because rounding can still collapse the failure risk to zero.
pub fn derive_metrics(
    record: &MachineRecord,
    policy: &ClassificationPolicy,
) -> Result<DerivedMetrics, ComputationError> {
    let machine_id = || record.machine_id.clone();

    if record.runtime_hours <= 0.0 {
        return Err(ComputationError::NonPositiveRuntime {
            machine_id: machine_id(),
            row: record.row,
        });
    }
    if record.max_operating_hours <= 0.0 {
        return Err(ComputationError::NonPositiveMaxHours {
            machine_id: machine_id(),
            row: record.row,
        });
    }

    let risk = predicted_failure_risk(record.vibration_level, record.scaling_factor);
    if risk == 0.0 {
        return Err(ComputationError::ZeroFailureRisk {
            machine_id: machine_id(),
            row: record.row,
        });
    }

    let urgency = maintenance_urgency_ratio(risk, record.runtime_hours);
    let margin = operating_margin(record.max_operating_hours, record.runtime_hours);
    let score = composite_score(margin, urgency, policy);
    let efficiency = efficiency_ratio(record.runtime_hours, risk);

    let metrics = DerivedMetrics {
        predicted_failure_risk: risk,
        maintenance_urgency_ratio: urgency,
        operating_margin: margin,
        composite_score: score,
        efficiency_ratio: efficiency,
    };

    if let Some(metric) = metrics.first_non_finite() {
        return Err(ComputationError::NonFinite {
            machine_id: machine_id(),
            row: record.row,
            metric,
        });
    }

    trace!(machine_id = %record.machine_id, ?metrics, "Derived metrics");
    Ok(metrics)
}

impl DerivedMetrics {
    fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("predicted_failure_risk", self.predicted_failure_risk),
            ("maintenance_urgency_ratio", self.maintenance_urgency_ratio),
            ("operating_margin", self.operating_margin),
            ("composite_score", self.composite_score),
            ("efficiency_ratio", self.efficiency_ratio),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
    }
}
