//! promptlib CLI - command-line interface for versioned prompt documents
//!
//! This is the main entry point for the promptlib CLI application, providing
//! commands for validating, rendering and inspecting prompt documents and
//! for previewing the provider requests they produce.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Configuration drives colors and logging, so it is loaded first
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e, !cli.no_color),
    };

    control::set_override(cli.use_color(&config));

    // Keep the guard alive so file logs are flushed on exit
    let log_guard = match init_logging(&cli, &config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            None
        }
    };

    match run(cli, &config) {
        Ok(()) => {}
        Err(e) => {
            drop(log_guard);
            exit_with(&e, control::SHOULD_COLORIZE.should_colorize());
        }
    }
}

/// Print an error and exit with its code
fn exit_with(e: &error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(e, use_color));

    if e.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(e.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(
        cli.output_format(config),
        cli.use_color(config),
        cli.quiet,
        cli.verbosity_level(),
    );

    tracing::info!(
        command = ?cli.command,
        verbosity = output.verbosity(),
        config = ?config.source,
        "Executing command"
    );
    if let Some(source) = &config.source {
        output.debug(&format!("Using configuration from {}", source.display()))?;
    }

    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, config, &mut output),
        Commands::Render(args) => handlers::handle_render(args, config, &mut output),
        Commands::Request(args) => handlers::handle_request(args, config, &mut output),
        Commands::Metadata(args) => handlers::handle_metadata(args, config, &mut output),
        Commands::List(args) => handlers::handle_list(args, config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<Option<WorkerGuard>> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);

    logging_config.apply_settings(&config.logging, verbosity);
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
