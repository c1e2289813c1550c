//! `taskflow` binary entry point.
//!
//! # Responsibility
//! - Load configuration and start logging.
//! - Open the database and hand the parsed command to [`run::run`].

mod cli;
mod run;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;
use taskflow_core::{init_logging, open_db, open_db_in_memory, AppConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    let config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Logging is best-effort; the CLI still works without a log file.
    if let Err(err) = init_logging(&config.log_level, &config.resolved_log_dir()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = if cli.ephemeral {
        open_db_in_memory()
    } else {
        open_db(config.db_path())
    };
    let conn = match conn {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let output = run::run(cli.command, &conn, &config);
    for line in &output.stdout {
        println!("{line}");
    }
    for line in &output.stderr {
        eprintln!("{line}");
    }
    ExitCode::from(output.exit_code)
}
