//! Report rendering for validation and analysis outcomes
//!
//! Markdown mirrors the human-readable layout operators expect; JSON is the
//! machine-readable form of the same data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod json;
pub mod markdown;

use crate::error::MaintenanceError;
use crate::telemetry::{BatchOutcome, ClassificationPolicy, ValidationReport};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Markdown => f.write_str("markdown"),
            ReportFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format: {}", other)),
        }
    }
}

/// Render the full outcome of a batch: validation report, then analysis if any
pub fn render_outcome(
    outcome: &BatchOutcome,
    policy: &ClassificationPolicy,
    format: ReportFormat,
) -> Result<String, MaintenanceError> {
    match format {
        ReportFormat::Markdown => {
            let mut out = markdown::render_validation(outcome.report());
            if let BatchOutcome::Evaluated { evaluations, .. } = outcome {
                out.push_str("\n\n");
                out.push_str(&markdown::render_analysis(
                    evaluations,
                    &outcome.summary(),
                    policy,
                ));
            }
            Ok(out)
        }
        ReportFormat::Json => Ok(json::render_outcome(outcome)?),
    }
}

/// Render only the validation report
pub fn render_validation(
    report: &ValidationReport,
    format: ReportFormat,
) -> Result<String, MaintenanceError> {
    match format {
        ReportFormat::Markdown => Ok(markdown::render_validation(report)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}
