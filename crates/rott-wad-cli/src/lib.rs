//! Command-line browser for Rise of the Triad WAD archives.
//!
//! The `rottwad` binary is a thin wrapper over this crate:
//! - `config`: CLI arguments and environment fallbacks
//! - `commands`: `list`, `markers`, `info` and `export`
//! - `output`: tables, JSON and PNG encoding
//!
//! # Example
//!
//! ```no_run
//! use rott_wad_cli::{CliConfig, run};
//!
//! fn main() -> anyhow::Result<()> {
//!     tracing_subscriber::fmt::init();
//!
//!     let config = CliConfig::from_args();
//!     config.validate()?;
//!     run(&config, &mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use commands::{ExportSummary, execute, export, run};
pub use config::{CliConfig, Command};
pub use error::{CliError, ConfigError};
pub use output::{LumpDetails, write_png};
