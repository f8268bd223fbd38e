//! Error types for the command-line browser.

use rott_wad::{LumpError, SessionError};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The WAD file does not exist
    #[error("WAD archive not found: {}", .0.display())]
    MissingArchive(PathBuf),

    /// Palette lump name cannot name a directory entry
    #[error("Invalid palette lump '{name}': {reason}")]
    InvalidPalette {
        /// The rejected name
        name: String,
        /// Reason for rejection
        reason: String,
    },

    /// Export destination exists but is a file
    #[error("Output path is not a directory: {}", .0.display())]
    OutputNotDirectory(PathBuf),

    /// `export` without lump names or `--all`
    #[error("Nothing to export: name at least one lump or pass --all")]
    NothingToExport,
}

/// Command execution errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Archive or lump error
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Export error
    #[error(transparent)]
    Lump(#[from] LumpError),

    /// PNG encoding error
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    /// JSON serialization error
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Some of the requested lumps could not be exported
    #[error("{failed} of {requested} lump(s) failed to export")]
    ExportFailed {
        /// Number of failed lumps
        failed: usize,
        /// Number of lumps asked for
        requested: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::MissingArchive(PathBuf::from("DARKWAR.WAD"));
        assert_eq!(err.to_string(), "WAD archive not found: DARKWAR.WAD");

        let err = ConfigError::NothingToExport;
        assert!(err.to_string().contains("--all"));
    }

    #[test]
    fn test_cli_error_conversion() {
        let err: CliError = ConfigError::NothingToExport.into();
        assert!(err.to_string().starts_with("Configuration error"));

        let err = CliError::ExportFailed {
            failed: 2,
            requested: 5,
        };
        assert_eq!(err.to_string(), "2 of 5 lump(s) failed to export");
    }
}
