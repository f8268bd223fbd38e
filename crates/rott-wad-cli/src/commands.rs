//! Subcommand execution.
//!
//! Commands write their report to any [`Write`] sink so they can be driven
//! from tests. Per-lump failures during `export --all` are logged and
//! counted, never fatal.

use crate::config::{CliConfig, Command};
use crate::error::CliError;
use crate::output::{LumpDetails, listing_json, listing_table, marker_table, write_png};
use rott_wad::export::{export_file_name, export_raw_voc};
use rott_wad::{LoadedLump, LumpKind, WadSession, export_lump};
use std::fs;
use std::io::{Read, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Files written by an export run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Paths written, in directory order
    pub written: Vec<PathBuf>,
    /// Lumps that have nothing to write
    pub skipped: Vec<String>,
    /// Lumps that failed, with the reason
    pub failed: Vec<(String, String)>,
}

/// Open the configured archive and run the configured subcommand.
pub fn run(config: &CliConfig, out: &mut impl Write) -> Result<(), CliError> {
    let mut session = WadSession::open(&config.wad, config.decode_options())?;
    execute(&mut session, &config.command, out)
}

/// Run `command` against an already opened session.
pub fn execute<R: Read + Seek>(
    session: &mut WadSession<R>,
    command: &Command,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::List { json } => list(session, *json, out),
        Command::Markers => markers(session, out),
        Command::Info { lump } => lump_info(session, lump, out),
        Command::Export {
            lumps,
            all,
            out: dir,
            raw_voc,
        } => {
            let targets = if *all {
                session
                    .lumps()
                    .into_iter()
                    .filter(|lump| lump.kind.is_decodable())
                    .map(|lump| lump.entry.name)
                    .collect()
            } else {
                lumps.clone()
            };

            let summary = export(session, &targets, dir, *raw_voc)?;
            for path in &summary.written {
                writeln!(out, "{}", path.display())?;
            }
            for (name, reason) in &summary.failed {
                writeln!(out, "failed {name}: {reason}")?;
            }
            writeln!(
                out,
                "{} file(s) written, {} skipped, {} failed",
                summary.written.len(),
                summary.skipped.len(),
                summary.failed.len()
            )?;

            if !*all && !summary.failed.is_empty() {
                return Err(CliError::ExportFailed {
                    failed: summary.failed.len(),
                    requested: targets.len(),
                });
            }
            Ok(())
        }
    }
}

fn list<R: Read + Seek>(
    session: &mut WadSession<R>,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let lumps = session.lumps();
    if json {
        writeln!(out, "{}", listing_json(&lumps)?)?;
    } else {
        write!(out, "{}", listing_table(&lumps))?;
    }
    Ok(())
}

fn markers<R: Read + Seek>(session: &WadSession<R>, out: &mut impl Write) -> Result<(), CliError> {
    write!(out, "{}", marker_table(session.markers()))?;
    Ok(())
}

fn lump_info<R: Read + Seek>(
    session: &mut WadSession<R>,
    name: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let lump = session.load(name)?;
    let section = session
        .markers()
        .section_of(lump.entry.id)
        .map(|marker| marker.name.as_str());
    write!(out, "{}", LumpDetails::new(&lump, section))?;
    Ok(())
}

/// Decode and write each lump in `names` into `dir`.
///
/// Rasters become PNG files, everything else its canonical byte export.
pub fn export<R: Read + Seek>(
    session: &mut WadSession<R>,
    names: &[String],
    dir: &Path,
    raw_voc: bool,
) -> Result<ExportSummary, CliError> {
    fs::create_dir_all(dir)?;
    let mut summary = ExportSummary::default();

    for name in names {
        let lump = match session.load(name) {
            Ok(lump) => lump,
            Err(e) => {
                warn!("Skipping {}: {}", name, e);
                summary.failed.push((name.clone(), e.to_string()));
                continue;
            }
        };

        match write_lump(&lump, dir, raw_voc) {
            Ok(paths) if paths.is_empty() => {
                debug!("{} has nothing to export", lump.entry.name);
                summary.skipped.push(lump.entry.name);
            }
            Ok(paths) => summary.written.extend(paths),
            Err(e) => {
                warn!("Failed to export {}: {}", lump.entry.name, e);
                summary.failed.push((lump.entry.name, e.to_string()));
            }
        }
    }

    info!(
        "Exported {} file(s) to {}",
        summary.written.len(),
        dir.display()
    );
    Ok(summary)
}

fn write_lump(lump: &LoadedLump, dir: &Path, raw_voc: bool) -> Result<Vec<PathBuf>, CliError> {
    let name = &lump.entry.name;
    let mut paths = Vec::new();

    if let Some(image) = lump.decoded.image() {
        let path = dir.join(export_file_name(name, "png"));
        write_png(&path, image)?;
        paths.push(path);
        return Ok(paths);
    }

    if let Some(export) = export_lump(name, &lump.decoded, &lump.data)? {
        paths.push(export.write_to(dir)?);
    }
    if raw_voc && lump.kind == LumpKind::Sound {
        if let Some(export) = export_raw_voc(name, &lump.data) {
            paths.push(export.write_to(dir)?);
        }
    }
    Ok(paths)
}
