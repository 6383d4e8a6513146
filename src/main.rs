mod cli;
mod commands;
mod config;
mod flatten;
mod model;
mod query;
mod reporting;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::reporting::ReportingError;

fn main() {
    init_tracing();

    if let Err(err) = run() {
        if let Some(unreachable) = find_unreachable(&err) {
            warn!(error = %unreachable, "reporting service unreachable, ending run");
            return;
        }

        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export(args) => commands::export::run(args),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Flatten(args) => commands::flatten::run(args),
    }
}

fn find_unreachable(err: &anyhow::Error) -> Option<&ReportingError> {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<ReportingError>())
        .find(|cause| cause.is_unreachable())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
