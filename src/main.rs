use clap::{CommandFactory, Parser};
use machine_health::cli::{execute_command, get_log_level, Cli};
use machine_health::config::{Config, ConfigLoader};
use machine_health::error::MaintenanceError;
use tracing::{debug, error, trace};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(e.exit_code());
        }
    };

    let log_level = get_log_level(cli.verbose, config.log_level.as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(log_level.as_str())
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2) // Show target module for -vv and above
        .with_thread_ids(cli.verbose >= 3) // Show thread IDs for -vvv
        .with_line_number(cli.verbose >= 3) // Show line numbers for -vvv
        .init();

    debug!("machine-health started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let Some(command) = cli.command else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    };

    let format = cli.format.unwrap_or(config.output.format);
    let stdout = std::io::stdout();
    let result = execute_command(command, &config, format, &mut stdout.lock());

    if let Err(e) = result {
        let exit_code = match e.downcast_ref::<MaintenanceError>() {
            Some(err) => {
                error!(code = err.code(), kind = err.code_description(), "Fatal error: {}", e);
                err.exit_code()
            }
            None => {
                error!("Fatal error: {}", e);
                1
            }
        };
        eprintln!("Error: {e}");
        std::process::exit(exit_code);
    }
}

fn load_config(cli: &Cli) -> Result<Config, MaintenanceError> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_config_file(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}
