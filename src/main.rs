//! doccache - command-line entry point
//!
//! doccache provides:
//! - Statistics and health checks for the documentation cache
//! - Package environment registration with bulk invalidation
//! - Manual get/put/evict/clear maintenance

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use doccache::cli;

fn init_tracing(cli: &cli::Cli) {
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    init_tracing(&cli);
    if cli.no_color {
        colored::control::set_override(false);
    }

    cli::run(cli)
}
