//! Telemetry input parsing
//!
//! Turns CSV or JSON text into [`RawRow`]s for the validator. Parsing only
//! cares about shape; field-level checks belong to the validation gate.

use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::telemetry::{Field, RawRow};

pub mod csv;
pub mod json;
pub mod sample;

pub use self::csv::parse_csv;
pub use self::json::parse_json;
pub use sample::SAMPLE_CSV;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV data: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("invalid JSON data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON input must be an array of row objects")]
    NotAnArray,

    #[error("JSON row {row} is not an object")]
    NotAnObject { row: usize },

    #[error("missing required field(s) in header: {}", join_fields(.0))]
    MissingColumns(Vec<Field>),

    #[error("no data found in input")]
    Empty,
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Pick a format from the file extension; anything but `.json` is CSV
    pub fn detect(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }
}

/// Parse already-loaded text in the given format
pub fn parse(data: &str, format: InputFormat) -> Result<Vec<RawRow>, InputError> {
    let rows = match format {
        InputFormat::Csv => parse_csv(data)?,
        InputFormat::Json => parse_json(data)?,
    };
    debug!(rows = rows.len(), ?format, "Parsed telemetry input");
    Ok(rows)
}

/// Read and parse a file, or stdin when the path is `-`
pub fn read_rows(path: &Path, format: Option<InputFormat>) -> Result<Vec<RawRow>, InputError> {
    let format = format.unwrap_or_else(|| InputFormat::detect(path));
    let io_error = |source| InputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let data = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(io_error)?;
        buffer
    } else {
        std::fs::read_to_string(path).map_err(io_error)?
    };

    parse(&data, format)
}
