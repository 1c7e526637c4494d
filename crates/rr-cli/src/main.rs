//! `rr-route` entry point.
//!
//! ```text
//! rr-route --nodes nodes.csv --edges edges.csv 178641055 178718777
//! rr-route --pbf delaware-latest.osm.pbf 39.158,-75.524 39.739,-75.540
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rr_cli::{exit_code, run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v so a single module can be traced.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let stdout = std::io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}
