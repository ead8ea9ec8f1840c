//! Batch validation with error accumulation
//!
//! Every row is checked in order and every problem is collected, so a user
//! sees all errors of a batch in a single pass instead of fixing them one at
//! a time.
//!
//! ## Architecture
//!
//! - **Pure Functions**: no I/O, deterministic
//! - **Error Accumulation**: field checks never short-circuit; row errors are
//!   concatenated across the whole batch
//! - **All-or-nothing**: a single error anywhere rejects the entire batch
//!
//! ## Usage
//!
//! ```rust
//! use machine_health::telemetry::{validate_batch, RawRow};
//!
//! let rows = vec![RawRow::new(1)
//!     .with("machine_id", "M501")
//!     .with("runtime_hours", "50")
//!     .with("vibration_level", "2")
//!     .with("temperature", "80")
//!     .with("maintenance_threshold", "30")
//!     .with("max_operating_hours", "200")
//!     .with("scaling_factor", "5")];
//!
//! match validate_batch(&rows) {
//!     Ok(batch) => assert_eq!(batch.records.len(), 1),
//!     Err(report) => panic!("unexpected errors: {:?}", report.errors),
//! }
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

use super::record::{Field, MachineRecord, RawRow};

/// Allowed numeric range for a field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RangeRule {
    /// Strictly greater than zero
    Positive,
    /// Inclusive on both ends
    Between { min: f64, max: f64 },
}

impl RangeRule {
    pub fn admits(&self, value: f64) -> bool {
        match self {
            RangeRule::Positive => value > 0.0,
            RangeRule::Between { min, max } => (*min..=*max).contains(&value),
        }
    }

    /// Range constraint for a numeric field; `None` for `machine_id`
    pub fn for_field(field: Field) -> Option<RangeRule> {
        match field {
            Field::MachineId => None,
            Field::RuntimeHours
            | Field::VibrationLevel
            | Field::MaxOperatingHours
            | Field::ScalingFactor => Some(RangeRule::Positive),
            Field::Temperature => Some(RangeRule::Between {
                min: 0.0,
                max: 200.0,
            }),
            Field::MaintenanceThreshold => Some(RangeRule::Between {
                min: 0.0,
                max: 100.0,
            }),
        }
    }
}

impl fmt::Display for RangeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeRule::Positive => f.write_str("must be a positive number"),
            RangeRule::Between { min, max } => write!(f, "must be between {} and {}", min, max),
        }
    }
}

/// A single row-level validation failure
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Row {row}: Missing required field: {field}")]
    MissingField { field: Field, row: usize },

    #[error("Row {row}: Invalid value for {field}: must be a number (got '{value}')")]
    InvalidType {
        field: Field,
        row: usize,
        value: String,
    },

    #[error("Row {row}: Invalid value for {field}: {rule} (got {value})")]
    InvalidValue {
        field: Field,
        row: usize,
        value: f64,
        rule: RangeRule,
    },
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            Self::MissingField { field, .. }
            | Self::InvalidType { field, .. }
            | Self::InvalidValue { field, .. } => *field,
        }
    }

    pub fn row(&self) -> usize {
        match self {
            Self::MissingField { row, .. }
            | Self::InvalidType { row, .. }
            | Self::InvalidValue { row, .. } => *row,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Present,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    Valid,
    Invalid,
}

/// Aggregate status of one field across the whole batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldStatus {
    pub field: Field,
    /// Missing if any row lacks the field
    pub presence: Presence,
    /// Invalid if any row has an error on the field
    pub validity: Validity,
}

/// Outcome summary of one validation pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub machine_count: usize,
    pub field_count: usize,
    pub fields: Vec<FieldStatus>,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Build a report from the accumulated errors of a batch
    pub fn from_errors(machine_count: usize, errors: Vec<ValidationError>) -> Self {
        let fields = Field::ALL
            .iter()
            .map(|&field| {
                let mut touched = errors.iter().filter(|e| e.field() == field).peekable();
                let validity = if touched.peek().is_some() {
                    Validity::Invalid
                } else {
                    Validity::Valid
                };
                let presence = if touched.any(|e| matches!(e, ValidationError::MissingField { .. }))
                {
                    Presence::Missing
                } else {
                    Presence::Present
                };
                FieldStatus {
                    field,
                    presence,
                    validity,
                }
            })
            .collect();

        Self {
            machine_count,
            field_count: Field::COUNT,
            fields,
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Distinct row numbers with at least one error, ascending
    pub fn failed_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.errors.iter().map(ValidationError::row).collect();
        rows.sort_unstable();
        rows.dedup();
        rows
    }
}

/// Records that passed the gate, together with the success report
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBatch {
    pub report: ValidationReport,
    pub records: Vec<MachineRecord>,
}

/// Validate a single numeric field (pure function)
///
/// The type check runs first; the range check only runs on parsed numbers.
pub fn validate_numeric(row: &RawRow, field: Field) -> Result<f64, ValidationError> {
    let raw = row.get(field).ok_or(ValidationError::MissingField {
        field,
        row: row.row,
    })?;

    let value = raw.as_number().ok_or_else(|| ValidationError::InvalidType {
        field,
        row: row.row,
        value: raw.as_text(),
    })?;

    match RangeRule::for_field(field) {
        Some(rule) if !rule.admits(value) => Err(ValidationError::InvalidValue {
            field,
            row: row.row,
            value,
            rule,
        }),
        _ => Ok(value),
    }
}

/// Validate one row, collecting every field error
pub fn validate_row(row: &RawRow) -> Result<MachineRecord, Vec<ValidationError>> {
    let mut errors = Vec::new();

    for column in row.unknown_columns() {
        debug!(row = row.row, column, "Ignoring unknown column");
    }

    let machine_id = match row.get(Field::MachineId) {
        Some(raw) => Some(raw.as_text()),
        None => {
            errors.push(ValidationError::MissingField {
                field: Field::MachineId,
                row: row.row,
            });
            None
        }
    };

    let mut numeric = |field: Field| match validate_numeric(row, field) {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    };

    let runtime_hours = numeric(Field::RuntimeHours);
    let vibration_level = numeric(Field::VibrationLevel);
    let temperature = numeric(Field::Temperature);
    let maintenance_threshold = numeric(Field::MaintenanceThreshold);
    let max_operating_hours = numeric(Field::MaxOperatingHours);
    let scaling_factor = numeric(Field::ScalingFactor);

    match (
        machine_id,
        runtime_hours,
        vibration_level,
        temperature,
        maintenance_threshold,
        max_operating_hours,
        scaling_factor,
    ) {
        (
            Some(machine_id),
            Some(runtime_hours),
            Some(vibration_level),
            Some(temperature),
            Some(maintenance_threshold),
            Some(max_operating_hours),
            Some(scaling_factor),
        ) if errors.is_empty() => Ok(MachineRecord {
            row: row.row,
            machine_id,
            runtime_hours,
            vibration_level,
            temperature,
            maintenance_threshold,
            max_operating_hours,
            scaling_factor,
        }),
        _ => Err(errors),
    }
}

/// Validate all rows with error accumulation
///
/// # Returns
///
/// * `Ok` - every row is valid; carries the success report and all records
/// * `Err` - one or more rows failed; the report carries ALL errors in row order
pub fn validate_batch(rows: &[RawRow]) -> Result<ValidatedBatch, ValidationReport> {
    let mut records = Vec::with_capacity(rows.len());
    let mut all_errors = Vec::new();

    for row in rows {
        match validate_row(row) {
            Ok(record) => records.push(record),
            Err(errors) => {
                debug!(row = row.row, errors = errors.len(), "Row failed validation");
                all_errors.extend(errors);
            }
        }
    }

    let report = ValidationReport::from_errors(rows.len(), all_errors);
    if report.is_valid() {
        Ok(ValidatedBatch { report, records })
    } else {
        Err(report)
    }
}

/// Validate all rows, returning only the records on success
pub fn validate(rows: &[RawRow]) -> Result<Vec<MachineRecord>, ValidationReport> {
    validate_batch(rows).map(|batch| batch.records)
}
