/// Error code registry for machine-health
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Input errors
/// - 3000-3999: Validation errors
/// - 4000-4999: Computation errors
/// - 5000-5999: Report errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_READ_ERROR: u16 = 1003;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;

    // Input errors (2000-2999)
    pub const INPUT_IO_ERROR: u16 = 2001;
    pub const INPUT_INVALID_CSV: u16 = 2002;
    pub const INPUT_INVALID_JSON: u16 = 2003;
    pub const INPUT_MISSING_COLUMNS: u16 = 2004;
    pub const INPUT_EMPTY: u16 = 2005;

    // Validation errors (3000-3999)
    pub const VALIDATION_BATCH_REJECTED: u16 = 3001;

    // Computation errors (4000-4999)
    pub const COMPUTATION_ZERO_DIVISOR: u16 = 4001;
    pub const COMPUTATION_NON_FINITE: u16 = 4002;
    pub const COMPUTATION_MAINTENANCE_REQUIRED: u16 = 4003;

    // Report errors (5000-5999)
    pub const REPORT_SERIALIZATION_ERROR: u16 = 5001;
    pub const REPORT_WRITE_ERROR: u16 = 5002;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        // Configuration errors
        1001 => "Configuration file not found",
        1002 => "Invalid TOML syntax in configuration",
        1003 => "Failed to read configuration file",
        1005 => "Invalid value in configuration",

        // Input errors
        2001 => "Failed to read input",
        2002 => "Malformed CSV input",
        2003 => "Malformed JSON input",
        2004 => "Input header lacks required columns",
        2005 => "Input contains no data rows",

        // Validation errors
        3001 => "Batch rejected by validation",

        // Computation errors
        4001 => "Metric divisor is zero",
        4002 => "Metric is not a finite number",
        4003 => "One or more machines require maintenance",

        // Report errors
        5001 => "Failed to serialize report",
        5002 => "Failed to write report",

        _ => "Unknown error code",
    }
}
