//! Two-phase evaluation: validation gate, then per-record computation
//!
//! Nothing is computed unless the whole batch validates. After the gate each
//! record is evaluated on its own; a computation error on one record never
//! affects another, and results keep input row order.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::classify::{
    classify, ClassificationPolicy, ConditionChecks, RecommendedAction, Status,
};
use super::metrics::{derive_metrics, ComputationError, DerivedMetrics};
use super::record::{MachineRecord, RawRow};
use super::validation::{validate_batch, ValidationReport};

/// Fully computed and classified metrics for one machine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    pub row: usize,
    pub machine_id: String,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
    pub checks: ConditionChecks,
    pub status: Status,
    pub recommended_action: RecommendedAction,
}

impl MetricResult {
    pub fn is_optimal(&self) -> bool {
        self.status == Status::Optimal
    }
}

/// Compute and classify one record with the reference policy
pub fn compute_and_classify(record: &MachineRecord) -> Result<MetricResult, ComputationError> {
    compute_and_classify_with(record, &ClassificationPolicy::default())
}

/// Compute and classify one record
pub fn compute_and_classify_with(
    record: &MachineRecord,
    policy: &ClassificationPolicy,
) -> Result<MetricResult, ComputationError> {
    let metrics = derive_metrics(record, policy)?;
    let classification = classify(&metrics, record.maintenance_threshold, policy);

    debug!(
        machine_id = %record.machine_id,
        row = record.row,
        status = %classification.status,
        "Classified machine"
    );

    Ok(MetricResult {
        row: record.row,
        machine_id: record.machine_id.clone(),
        metrics,
        checks: classification.checks,
        status: classification.status,
        recommended_action: classification.recommended_action,
    })
}

/// Evaluation of a single record after the gate
#[derive(Debug, Clone, PartialEq)]
pub struct RecordEvaluation {
    pub record: MachineRecord,
    pub outcome: Result<MetricResult, ComputationError>,
}

/// Counts over an evaluated batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub optimal: usize,
    pub requires_maintenance: usize,
    pub computation_errors: usize,
}

impl BatchSummary {
    pub fn all_optimal(&self) -> bool {
        self.optimal == self.total
    }
}

/// Result of running a batch through both phases
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// The gate rejected the batch; no metrics were computed
    Rejected(ValidationReport),
    /// Every row validated; one evaluation per row, in input order
    Evaluated {
        report: ValidationReport,
        evaluations: Vec<RecordEvaluation>,
    },
}

impl BatchOutcome {
    pub fn report(&self) -> &ValidationReport {
        match self {
            BatchOutcome::Rejected(report) | BatchOutcome::Evaluated { report, .. } => report,
        }
    }

    pub fn evaluations(&self) -> &[RecordEvaluation] {
        match self {
            BatchOutcome::Rejected(_) => &[],
            BatchOutcome::Evaluated { evaluations, .. } => evaluations,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, BatchOutcome::Rejected(_))
    }

    pub fn summary(&self) -> BatchSummary {
        self.evaluations()
            .iter()
            .fold(BatchSummary::default(), |mut summary, evaluation| {
                summary.total += 1;
                match &evaluation.outcome {
                    Ok(result) if result.is_optimal() => summary.optimal += 1,
                    Ok(_) => summary.requires_maintenance += 1,
                    Err(_) => summary.computation_errors += 1,
                }
                summary
            })
    }
}

/// Validate a batch and, if it passes, evaluate every record
pub fn evaluate_batch(rows: &[RawRow], policy: &ClassificationPolicy) -> BatchOutcome {
    let batch = match validate_batch(rows) {
        Ok(batch) => batch,
        Err(report) => {
            warn!(
                machines = report.machine_count,
                errors = report.errors.len(),
                "Batch rejected by validation"
            );
            return BatchOutcome::Rejected(report);
        }
    };

    let evaluations: Vec<RecordEvaluation> = batch
        .records
        .into_iter()
        .map(|record| {
            let outcome = compute_and_classify_with(&record, policy);
            if let Err(error) = &outcome {
                warn!(
                    machine_id = error.machine_id(),
                    row = error.row(),
                    %error,
                    "Skipping classification"
                );
            }
            RecordEvaluation { record, outcome }
        })
        .collect();

    let outcome = BatchOutcome::Evaluated {
        report: batch.report,
        evaluations,
    };
    let summary = outcome.summary();
    info!(
        total = summary.total,
        optimal = summary.optimal,
        requires_maintenance = summary.requires_maintenance,
        computation_errors = summary.computation_errors,
        "Batch evaluated"
    );
    outcome
}
