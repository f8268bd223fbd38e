//! rottwad binary entry point.
//!
//! This is a thin wrapper around the rott-wad-cli library that:
//! 1. Initializes logging
//! 2. Parses command-line arguments
//! 3. Validates configuration
//! 4. Runs the subcommand
//!
//! Logs go to stderr so listings and JSON on stdout stay clean.

use anyhow::Result;
use rott_wad_cli::{CliConfig, run};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_args();
    tracing::debug!(
        "Configuration loaded: wad={}, palette={}, darkness={:?}",
        config.wad.display(),
        config.palette,
        config.darkness
    );

    config.validate()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&config, &mut out)?;

    Ok(())
}
