//! Marker list of a loaded archive

use crate::archive::{DirectoryEntry, normalize_name};
use crate::lump::{LumpKind, classify_named};
use crate::marker::{PC_SPEAKER_SECTION, is_marker};
use serde::Serialize;
use tracing::debug;

/// A directory entry recognized as a section delimiter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    /// Directory position
    pub id: usize,
    /// Upper-case name
    pub name: String,
    /// Data offset
    pub offset: u32,
    /// Data size, usually 0
    pub size: u32,
}

impl From<&DirectoryEntry> for Marker {
    fn from(entry: &DirectoryEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            offset: entry.offset,
            size: entry.size,
        }
    }
}

/// Keeps the markers of one archive and classifies the entries between them
#[derive(Debug, Clone, Default)]
pub struct MarkerController {
    markers: Vec<Marker>,
}

impl MarkerController {
    /// Empty controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller holding the markers found in `entries`
    pub fn from_entries(entries: &[DirectoryEntry]) -> Self {
        let mut controller = Self::new();
        controller.rebuild(entries);
        controller
    }

    /// Forget all markers and scan `entries` again
    pub fn rebuild(&mut self, entries: &[DirectoryEntry]) {
        self.clear();
        self.markers
            .extend(entries.iter().filter(|e| is_marker(&e.name)).map(Marker::from));
        debug!("Found {} marker(s) in {} entries", self.markers.len(), entries.len());
    }

    /// Append a marker
    pub fn add(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Remove every marker called `name`
    pub fn remove(&mut self, name: &str) {
        let name = normalize_name(name);
        self.markers.retain(|m| m.name != name);
    }

    /// Remove all markers
    pub fn clear(&mut self) {
        self.markers.clear();
    }

    /// All markers in insertion order
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Number of markers
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// True when no marker is known
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Last marker called `name`
    pub fn by_name(&self, name: &str) -> Option<&Marker> {
        let name = normalize_name(name);
        self.markers.iter().rev().find(|m| m.name == name)
    }

    /// Directory position of the first marker called `name`
    pub fn id_by_name(&self, name: &str) -> Option<usize> {
        let name = normalize_name(name);
        self.markers.iter().find(|m| m.name == name).map(|m| m.id)
    }

    /// Marker that opens the section containing directory entry `id`
    ///
    /// This is the closest marker before `id`; entries before the first
    /// marker belong to no section.
    pub fn section_of(&self, id: usize) -> Option<&Marker> {
        self.markers
            .iter()
            .filter(|m| m.id < id)
            .max_by_key(|m| m.id)
    }

    /// Kind of a directory entry given its bytes
    ///
    /// Markers are recognized by name, other zero-size entries are
    /// [`LumpKind::Empty`]. Content lumps go through the classifier, then the
    /// text name rule, then the PC speaker section rule.
    pub fn classify_entry(&self, entry: &DirectoryEntry, data: &[u8]) -> LumpKind {
        if is_marker(&entry.name) {
            return LumpKind::Marker;
        }
        if entry.size == 0 || data.is_empty() {
            return LumpKind::Empty;
        }

        match classify_named(&entry.name, data) {
            LumpKind::Unknown
                if self
                    .section_of(entry.id)
                    .is_some_and(|m| m.name == PC_SPEAKER_SECTION) =>
            {
                LumpKind::PcSpeaker
            }
            kind => kind,
        }
    }
}
