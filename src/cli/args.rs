//! CLI argument structures

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::input::InputFormat;
use crate::report::ReportFormat;

/// Validate machine telemetry and flag machines that need maintenance
#[derive(Parser)]
#[command(name = "machine-health")]
#[command(about = "machine-health - Validate machine telemetry and flag maintenance needs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Report format (overrides configuration)
    #[arg(long, value_enum, global = true)]
    pub format: Option<ReportFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a telemetry batch and classify every machine
    Analyze {
        /// Telemetry file (CSV or JSON), or - for stdin
        input: PathBuf,

        /// Input format (detected from the file extension by default)
        #[arg(long, value_enum)]
        input_format: Option<InputFormat>,

        /// Exit with status 3 unless every machine is optimal
        #[arg(long)]
        fail_on_maintenance: bool,
    },
    /// Validate a telemetry batch without computing metrics
    Validate {
        /// Telemetry file (CSV or JSON), or - for stdin
        input: PathBuf,

        /// Input format (detected from the file extension by default)
        #[arg(long, value_enum)]
        input_format: Option<InputFormat>,
    },
    /// Print the built-in sample telemetry batch as CSV
    Sample,
}
