use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{App, Commands};

mod cli;
mod commands;
mod ui;

fn main() -> ExitCode {
    let app = App::parse();
    init_logging(app.verbose);

    let result = match &app.cmd {
        Commands::Inspect(arg) => commands::inspect(arg),
        Commands::Coverage(arg) => commands::coverage(arg),
        Commands::Detect(arg) => commands::detect(arg),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();
}
