//! # machine-health
//!
//! Validates batches of machine telemetry and classifies each machine as
//! optimal or in need of maintenance.
//!
//! ## Usage
//!
//! ```bash
//! machine-health analyze telemetry.csv [--format json] [--fail-on-maintenance]
//! ```
//!
//! ## Modules
//!
//! - `telemetry` - Validation gate, metric chain and classification (the pure core)
//! - `input` - CSV and JSON parsing into raw rows
//! - `report` - Markdown and JSON report rendering
//! - `config` - Layered TOML/environment configuration
//! - `error` - Coded error type and exit-code mapping
//! - `cli` - Command-line arguments and command handlers
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod report;
pub mod telemetry;

pub use telemetry::{
    compute_and_classify, evaluate_batch, validate, BatchOutcome, MachineRecord, MetricResult,
    RawRow, ValidationReport,
};
