use std::path::PathBuf;

use serde::Serialize;

/// One child of a listed directory.
///
/// Constructed fresh on every cache-miss listing and never mutated afterwards.
/// Serializes with camelCase keys (`isFolder`, `isBinary`, `parentPath`) so a
/// boundary layer can hand it to clients unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Base name of the entry. Never empty.
    pub name: String,

    /// True iff the entry is a directory.
    pub is_folder: bool,

    /// Binary classification from the detector. Only meaningful for files;
    /// always false for folders.
    pub is_binary: bool,

    /// The absolute directory path this entry was enumerated under.
    pub parent_path: PathBuf,
}

/// Optional restrictions on a listing result.
///
/// `None` means "don't care". A set flag keeps only entries whose
/// corresponding field equals it exactly. Filters apply after cache
/// retrieval, so the cache key stays the bare directory path.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter {
    /// Keep only entries with this `is_folder` value.
    pub folder: Option<bool>,

    /// Keep only entries with this `is_binary` value.
    pub binary: Option<bool>,
}

impl ListFilter {
    /// Returns `true` if `entry` passes every set flag.
    pub fn matches(&self, entry: &FileEntry) -> bool {
        self.folder.map_or(true, |want| entry.is_folder == want)
            && self.binary.map_or(true, |want| entry.is_binary == want)
    }
}
