//! Command implementations
//!
//! Handlers write reports to the given writer and signal rejected batches or
//! unwanted classifications through [`MaintenanceError`] so the binary can
//! map them to exit codes.

use anyhow::Result;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::cli::args::Commands;
use crate::config::Config;
use crate::error::MaintenanceError;
use crate::input::{self, InputFormat, SAMPLE_CSV};
use crate::report::{self, ReportFormat};
use crate::telemetry::{evaluate_batch, validate_batch};

/// Execute a CLI command based on the parsed arguments
pub fn execute_command(
    command: Commands,
    config: &Config,
    format: ReportFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::Analyze {
            input,
            input_format,
            fail_on_maintenance,
        } => run_analyze(&input, input_format, fail_on_maintenance, config, format, out),
        Commands::Validate {
            input,
            input_format,
        } => run_validate(&input, input_format, format, out),
        Commands::Sample => {
            out.write_all(SAMPLE_CSV.as_bytes())?;
            Ok(())
        }
    }
}

pub fn run_analyze(
    input_path: &Path,
    input_format: Option<InputFormat>,
    fail_on_maintenance: bool,
    config: &Config,
    format: ReportFormat,
    out: &mut dyn Write,
) -> Result<()> {
    info!(input = %input_path.display(), "Analyzing telemetry");
    let rows = input::read_rows(input_path, input_format).map_err(MaintenanceError::from)?;

    let outcome = evaluate_batch(&rows, &config.analysis);
    let text = report::render_outcome(&outcome, &config.analysis, format)?;
    writeln!(out, "{}", text)?;

    if outcome.is_rejected() {
        return Err(MaintenanceError::batch_rejected(outcome.report()).into());
    }

    let summary = outcome.summary();
    debug!(?summary, "Analysis complete");
    if fail_on_maintenance && !summary.all_optimal() {
        return Err(MaintenanceError::maintenance_required(&summary).into());
    }
    Ok(())
}

pub fn run_validate(
    input_path: &Path,
    input_format: Option<InputFormat>,
    format: ReportFormat,
    out: &mut dyn Write,
) -> Result<()> {
    info!(input = %input_path.display(), "Validating telemetry");
    let rows = input::read_rows(input_path, input_format).map_err(MaintenanceError::from)?;

    match validate_batch(&rows) {
        Ok(batch) => {
            writeln!(out, "{}", report::render_validation(&batch.report, format)?)?;
            Ok(())
        }
        Err(validation) => {
            writeln!(out, "{}", report::render_validation(&validation, format)?)?;
            Err(MaintenanceError::batch_rejected(&validation).into())
        }
    }
}
