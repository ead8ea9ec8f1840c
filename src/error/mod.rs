use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

use crate::config::ConfigError;
use crate::input::InputError;
use crate::telemetry::{BatchSummary, ComputationError, ValidationReport};

/// The unified error type surfaced by the machine-health binary
#[derive(Error, Debug)]
pub enum MaintenanceError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Input error: {message}")]
    Input {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Validation error: {message}")]
    Validation {
        code: u16,
        message: String,
        error_count: usize,
    },

    #[error("[E{code:04}] Computation error: {message}")]
    Computation {
        code: u16,
        message: String,
        row: Option<usize>,
    },

    #[error("[E{code:04}] Report error: {message}")]
    Report {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl MaintenanceError {
    /// Create a configuration error with specific code and path
    pub fn config_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn input_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Input {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// The batch did not pass the validation gate
    pub fn batch_rejected(report: &ValidationReport) -> Self {
        Self::Validation {
            code: ErrorCode::VALIDATION_BATCH_REJECTED,
            message: format!(
                "{} error(s) across {} of {} row(s); no metrics were computed",
                report.errors.len(),
                report.failed_rows().len(),
                report.machine_count
            ),
            error_count: report.errors.len(),
        }
    }

    /// Some machines were not classified as optimal
    pub fn maintenance_required(summary: &BatchSummary) -> Self {
        Self::Computation {
            code: ErrorCode::COMPUTATION_MAINTENANCE_REQUIRED,
            message: format!(
                "{} machine(s) require maintenance, {} could not be evaluated",
                summary.requires_maintenance, summary.computation_errors
            ),
            row: None,
        }
    }

    pub fn report_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Report {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    ///
    /// Validation and computation errors carry their detail inline and
    /// ignore the source.
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Input { source: src, .. }
            | Self::Report { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::Validation { .. } | Self::Computation { .. } => {}
        }
        self
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => 2,
            Self::Computation { .. } => 3,
            Self::Config { .. } | Self::Input { .. } | Self::Report { .. } => 1,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Input { code, .. }
            | Self::Validation { code, .. }
            | Self::Computation { code, .. }
            | Self::Report { code, .. } => *code,
        }
    }

    /// Registry description of this error's code
    pub fn code_description(&self) -> &'static str {
        describe_error_code(self.code())
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, path, .. } => match path {
                Some(p) => format!("Configuration problem in {}: {}", p.display(), message),
                None => format!("Configuration problem: {}", message),
            },
            Self::Input { message, .. } => format!("Could not read telemetry: {}", message),
            Self::Validation { message, .. } => format!("Telemetry rejected: {}", message),
            Self::Computation { message, row, .. } => match row {
                Some(r) => format!("Row {}: {}", r, message),
                None => message.clone(),
            },
            Self::Report { message, .. } => format!("Could not produce report: {}", message),
        }
    }
}

impl From<std::io::Error> for MaintenanceError {
    fn from(err: std::io::Error) -> Self {
        MaintenanceError::report_with_code(ErrorCode::REPORT_WRITE_ERROR, "I/O operation failed")
            .with_source(err)
    }
}

impl From<serde_json::Error> for MaintenanceError {
    fn from(err: serde_json::Error) -> Self {
        MaintenanceError::report_with_code(
            ErrorCode::REPORT_SERIALIZATION_ERROR,
            "Failed to serialize report",
        )
        .with_source(err)
    }
}

impl From<InputError> for MaintenanceError {
    fn from(err: InputError) -> Self {
        let code = match &err {
            InputError::Io { .. } => ErrorCode::INPUT_IO_ERROR,
            InputError::Csv(_) => ErrorCode::INPUT_INVALID_CSV,
            InputError::Json(_) | InputError::NotAnArray | InputError::NotAnObject { .. } => {
                ErrorCode::INPUT_INVALID_JSON
            }
            InputError::MissingColumns(_) => ErrorCode::INPUT_MISSING_COLUMNS,
            InputError::Empty => ErrorCode::INPUT_EMPTY,
        };
        MaintenanceError::input_with_code(code, err.to_string()).with_source(err)
    }
}

impl From<ConfigError> for MaintenanceError {
    fn from(err: ConfigError) -> Self {
        let (code, path) = match &err {
            ConfigError::NotFound(path) => (ErrorCode::CONFIG_NOT_FOUND, Some(path.clone())),
            ConfigError::Read { path, .. } => (ErrorCode::CONFIG_READ_ERROR, Some(path.clone())),
            ConfigError::Parse { path, .. } => (ErrorCode::CONFIG_INVALID_TOML, Some(path.clone())),
            ConfigError::Invalid(_) => (ErrorCode::CONFIG_INVALID_VALUE, None),
        };
        MaintenanceError::config_with_code(code, err.to_string(), path).with_source(err)
    }
}

impl From<&ComputationError> for MaintenanceError {
    fn from(err: &ComputationError) -> Self {
        let code = match err {
            ComputationError::NonFinite { .. } => ErrorCode::COMPUTATION_NON_FINITE,
            _ => ErrorCode::COMPUTATION_ZERO_DIVISOR,
        };
        MaintenanceError::Computation {
            code,
            message: err.to_string(),
            row: Some(err.row()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{Field, ValidationError};

    #[test]
    fn test_io_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err = MaintenanceError::from(io_err);

        assert_eq!(err.code(), ErrorCode::REPORT_WRITE_ERROR);
        assert!(err.to_string().starts_with("[E5002]"));
        assert_eq!(err.code_description(), "Failed to write report");
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_batch_rejected_counts_rows() {
        let report = ValidationReport::from_errors(
            5,
            vec![
                ValidationError::MissingField {
                    field: Field::Temperature,
                    row: 3,
                },
                ValidationError::MissingField {
                    field: Field::ScalingFactor,
                    row: 3,
                },
            ],
        );
        let err = MaintenanceError::batch_rejected(&report);
        assert_eq!(err.code(), ErrorCode::VALIDATION_BATCH_REJECTED);
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("2 error(s) across 1 of 5 row(s)"));
    }

    #[test]
    fn test_computation_error_conversion() {
        let err = MaintenanceError::from(&ComputationError::ZeroFailureRisk {
            machine_id: "M9".to_string(),
            row: 9,
        });
        assert_eq!(err.code(), ErrorCode::COMPUTATION_ZERO_DIVISOR);
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_message().starts_with("Row 9:"));
    }

    #[test]
    fn test_input_error_codes() {
        let err = MaintenanceError::from(InputError::MissingColumns(vec![Field::Temperature]));
        assert_eq!(err.code(), ErrorCode::INPUT_MISSING_COLUMNS);
        assert!(err.to_string().contains("temperature"));

        let err = MaintenanceError::from(InputError::Empty);
        assert_eq!(err.code(), ErrorCode::INPUT_EMPTY);
    }

    #[test]
    fn test_config_error_keeps_path() {
        let err = MaintenanceError::from(ConfigError::NotFound(PathBuf::from("missing.toml")));
        assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);
        assert!(err.user_message().contains("missing.toml"));
    }
}
