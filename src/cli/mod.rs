//! CLI argument parsing and command handlers

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
pub use commands::execute_command;

/// Tracing filter for a `-v` count, or the configured level when not verbose
pub fn get_log_level(verbose: u8, configured: Option<&str>) -> String {
    match (verbose, configured) {
        (0, Some(level)) => level.to_string(),
        (0, None) => "warn".to_string(),
        (1, _) => "info".to_string(),
        (2, _) => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_overrides_config() {
        assert_eq!(get_log_level(0, None), "warn");
        assert_eq!(get_log_level(0, Some("machine_health=debug")), "machine_health=debug");
        assert_eq!(get_log_level(1, Some("error")), "info");
        assert_eq!(get_log_level(2, None), "debug");
        assert_eq!(get_log_level(5, None), "trace");
    }
}
