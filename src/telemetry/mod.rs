//! Telemetry validation and maintenance classification core
//!
//! - `record` - raw rows and validated machine records
//! - `validation` - batch validation with error accumulation
//! - `metrics` - the rounded five-step metric chain
//! - `classify` - the compound optimal/maintenance decision rule
//! - `pipeline` - the validation gate followed by per-record evaluation

pub mod classify;
pub mod metrics;
pub mod pipeline;
pub mod record;
pub mod validation;

pub use classify::{
    classify, ClassificationPolicy, Classification, ConditionChecks, RecommendedAction, Status,
};
pub use metrics::{derive_metrics, round2, ComputationError, DerivedMetrics};
pub use pipeline::{
    compute_and_classify, compute_and_classify_with, evaluate_batch, BatchOutcome, BatchSummary,
    MetricResult, RecordEvaluation,
};
pub use record::{Field, MachineRecord, RawRow, RawValue};
pub use validation::{
    validate, validate_batch, FieldStatus, Presence, RangeRule, ValidatedBatch, ValidationError,
    ValidationReport, Validity,
};
