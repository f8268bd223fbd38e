//! Command-line configuration.
//!
//! Every global option can also be set through the environment:
//!
//! | Option          | Variable             | Default       |
//! |-----------------|----------------------|---------------|
//! | `--wad`         | `ROTTWAD_WAD`        | `DARKWAR.WAD` |
//! | `--darkness`    | `ROTTWAD_DARKNESS`   | full bright   |
//! | `--palette`     | `ROTTWAD_PALETTE`    | `PAL`         |
//! | `--mask-index`  | `ROTTWAD_MASK_INDEX` | 255           |
//!
//! Log output is controlled by `RUST_LOG`.
//!
//! # Example
//!
//! ```no_run
//! use rott_wad_cli::CliConfig;
//!
//! let config = CliConfig::from_args();
//! config.validate().expect("Invalid configuration");
//! println!("Browsing {}", config.wad.display());
//! ```

use crate::error::ConfigError;
use clap::{Parser, Subcommand};
use rott_wad::DecodeOptions;
use rott_wad::archive::MAX_NAME_LEN;
use rott_wad::options::DEFAULT_PALETTE;
use std::path::PathBuf;

/// Browser configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rottwad",
    about = "Browse and export Rise of the Triad WAD archives",
    version
)]
pub struct CliConfig {
    /// WAD archive to open
    #[arg(
        long,
        short = 'w',
        env = "ROTTWAD_WAD",
        default_value = "DARKWAR.WAD",
        global = true
    )]
    pub wad: PathBuf,

    /// Darkness applied to every picture (palette alpha, 0-255)
    #[arg(long, env = "ROTTWAD_DARKNESS", global = true)]
    pub darkness: Option<u8>,

    /// Palette lump for everything except the Apogee screens
    #[arg(long, env = "ROTTWAD_PALETTE", default_value = DEFAULT_PALETTE, global = true)]
    pub palette: String,

    /// Palette index drawn as transparent
    #[arg(long, env = "ROTTWAD_MASK_INDEX", global = true)]
    pub mask_index: Option<u8>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List every directory entry with its kind
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the section markers
    Markers,

    /// Decode one lump and print what it holds
    Info {
        /// Lump name, case-insensitive
        lump: String,
    },

    /// Write decoded lumps to disk
    Export {
        /// Lump names, case-insensitive
        lumps: Vec<String>,

        /// Export every lump that carries data
        #[arg(long)]
        all: bool,

        /// Destination directory
        #[arg(long, short = 'o', env = "ROTTWAD_OUT", default_value = ".")]
        out: PathBuf,

        /// Also write sounds as unmodified VOC bytes
        #[arg(long)]
        raw_voc: bool,
    },
}

impl CliConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Decode settings derived from the global options.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            darkness: self.darkness,
            mask_index: self.mask_index,
            default_palette: self.palette.clone(),
        }
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The WAD file doesn't exist
    /// - The palette name is empty or longer than a lump name
    /// - `export` names no lumps and no `--all`
    /// - The export destination is an existing file
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.wad.is_file() {
            return Err(ConfigError::MissingArchive(self.wad.clone()));
        }

        if self.palette.is_empty() {
            return Err(ConfigError::InvalidPalette {
                name: self.palette.clone(),
                reason: "name is empty".to_string(),
            });
        }
        if self.palette.len() > MAX_NAME_LEN {
            return Err(ConfigError::InvalidPalette {
                name: self.palette.clone(),
                reason: format!("lump names are at most {MAX_NAME_LEN} characters"),
            });
        }

        if let Command::Export {
            lumps, all, out, ..
        } = &self.command
        {
            if lumps.is_empty() && !all {
                return Err(ConfigError::NothingToExport);
            }
            if out.exists() && !out.is_dir() {
                return Err(ConfigError::OutputNotDirectory(out.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(args).expect("Arguments should parse")
    }

    #[test]
    fn test_parse_globals_after_subcommand() {
        let config = parse(&["rottwad", "list", "--json", "--wad", "HUNTBGIN.WAD", "--darkness", "12"]);
        assert_eq!(config.wad, PathBuf::from("HUNTBGIN.WAD"));
        assert_eq!(config.darkness, Some(12));
        assert_eq!(config.command, Command::List { json: true });
    }

    #[test]
    fn test_decode_options() {
        let config = parse(&["rottwad", "--palette", "pal2", "--mask-index", "0", "markers"]);
        let options = config.decode_options();
        assert_eq!(options.default_palette, "pal2");
        assert_eq!(options.mask_index, Some(0));
        assert_eq!(options.darkness, None);
    }

    #[test]
    fn test_darkness_out_of_range() {
        assert!(CliConfig::try_parse_from(["rottwad", "--darkness", "256", "markers"]).is_err());
    }

    #[test]
    fn test_validate() {
        let dir = TempDir::new().expect("Operation should succeed");
        let wad = dir.path().join("TEST.WAD");
        std::fs::write(&wad, b"IWAD").expect("Operation should succeed");
        let wad = wad.to_str().expect("Operation should succeed");

        let missing = parse(&["rottwad", "--wad", "/nonexistent/NOPE.WAD", "markers"]);
        assert!(matches!(missing.validate(), Err(ConfigError::MissingArchive(_))));

        let ok = parse(&["rottwad", "--wad", wad, "info", "PAL"]);
        assert!(ok.validate().is_ok());

        let long = parse(&["rottwad", "--wad", wad, "--palette", "PALETTE99", "markers"]);
        assert!(matches!(long.validate(), Err(ConfigError::InvalidPalette { .. })));

        let nothing = parse(&["rottwad", "--wad", wad, "export"]);
        assert!(matches!(nothing.validate(), Err(ConfigError::NothingToExport)));

        let into_file = parse(&["rottwad", "--wad", wad, "export", "--all", "--out", wad]);
        assert!(matches!(into_file.validate(), Err(ConfigError::OutputNotDirectory(_))));

        let all = parse(&["rottwad", "--wad", wad, "export", "--all", "-o", "fresh-dir"]);
        assert!(all.validate().is_ok());
    }
}
