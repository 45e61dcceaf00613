use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::cache::PathCache;
use crate::detect;
use crate::entry::{FileEntry, ListFilter};
use crate::error::ShelfError;
use crate::resolve::Resolver;
use crate::volume::{Child, PathKind, Volume};

// ---------------------------------------------------------------------------
// Cached read outcome
// ---------------------------------------------------------------------------

/// What a single-file read produced. Cached as-is, so a repeated miss or a
/// repeated binary refusal is answered without touching the volume (when
/// miss-caching is on).
#[derive(Clone)]
enum ReadOutcome {
    Text(String),
    Binary,
    Missing,
}

// ---------------------------------------------------------------------------
// Shelf
// ---------------------------------------------------------------------------

/// The file-access service: root-scoped listing, text read/write, and the
/// cache-aside store around both.
///
/// Created via [`shelf::at()`](crate::at). One instance serves concurrent
/// callers; all shared state is the two caches, which are safe for
/// concurrent access. Filesystem calls are blocking and uncancellable, so
/// a stalled volume stalls only the calling thread.
pub struct Shelf {
    resolver: Resolver,
    volume: Box<dyn Volume>,
    listings: PathCache<Option<Vec<FileEntry>>>,
    files: PathCache<ReadOutcome>,
    cache_misses: bool,
}

impl std::fmt::Debug for Shelf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shelf")
            .field("cache_misses", &self.cache_misses)
            .finish_non_exhaustive()
    }
}

impl Shelf {
    pub(crate) fn new(resolver: Resolver, volume: Box<dyn Volume>, cache_misses: bool) -> Self {
        Self {
            resolver,
            volume,
            listings: PathCache::new(),
            files: PathCache::new(),
            cache_misses,
        }
    }

    /// The configured root directory.
    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    // ── Listing ───────────────────────────────────────────────────────────

    /// Enumerate the immediate children of a directory under the root.
    ///
    /// Entries come back in the volume's enumeration order: no sort
    /// guarantee, not even across two calls. Children whose classification
    /// fails with an I/O error are dropped from the result; the listing
    /// itself still succeeds.
    ///
    /// # Errors
    ///
    /// [`ShelfError::DirectoryNotFound`] when the resolved path does not
    /// exist, is not a directory, or escapes a confined root.
    pub fn list(&self, relative: &str, filter: &ListFilter) -> Result<Vec<FileEntry>, ShelfError> {
        let dir = self.resolver.resolve(relative);
        if !self.resolver.admit(&dir) {
            warn!(path = %dir.display(), "listing refused: path escapes root");
            return Err(ShelfError::DirectoryNotFound(dir));
        }

        let listing = self.listings.get_or_compute(
            &dir,
            || self.scan(&dir),
            |l| self.cache_misses || l.is_some(),
        );

        match listing {
            Some(entries) => Ok(entries.into_iter().filter(|e| filter.matches(e)).collect()),
            None => Err(ShelfError::DirectoryNotFound(dir)),
        }
    }

    /// Fresh listing scan, the cache-miss path.
    fn scan(&self, dir: &Path) -> Option<Vec<FileEntry>> {
        info!(path = %dir.display(), "reading directory");

        if self.volume.kind(dir) != PathKind::Dir {
            warn!(path = %dir.display(), "invalid directory path");
            return None;
        }

        let children = match self.volume.children(dir) {
            Ok(children) => children,
            Err(err) => {
                warn!(path = %dir.display(), error = %err, "directory enumeration failed");
                return None;
            }
        };

        let mut entries = Vec::with_capacity(children.len());
        for Child { name, is_dir } in children {
            let is_binary = if is_dir {
                false
            } else {
                match self.classify(&dir.join(&name)) {
                    Ok(is_binary) => is_binary,
                    Err(err) => {
                        // One unreadable child never aborts the listing.
                        warn!(path = %dir.join(&name).display(), error = %err, "skipping unreadable entry");
                        continue;
                    }
                }
            };

            entries.push(FileEntry {
                name,
                is_folder: is_dir,
                is_binary,
                parent_path: dir.to_path_buf(),
            });
        }

        Some(entries)
    }

    // ── Text file read ────────────────────────────────────────────────────

    /// Read a text file under the root, returning its lines joined with a
    /// single `\n`.
    ///
    /// # Errors
    ///
    /// [`ShelfError::BinaryFile`] when the target exists but the detector
    /// classifies it as binary; [`ShelfError::NotFound`] when it is missing,
    /// is a directory, or fails to read.
    pub fn read(&self, relative: &str) -> Result<String, ShelfError> {
        let file = self.resolver.resolve(relative);
        if !self.resolver.admit(&file) {
            warn!(path = %file.display(), "read refused: path escapes root");
            return Err(ShelfError::NotFound(file));
        }
        self.read_resolved(&file)
    }

    fn read_resolved(&self, file: &Path) -> Result<String, ShelfError> {
        let outcome = self.files.get_or_compute(
            file,
            || self.fetch(file),
            |o| self.cache_misses || matches!(o, ReadOutcome::Text(_)),
        );

        match outcome {
            ReadOutcome::Text(content) => Ok(content),
            ReadOutcome::Binary => Err(ShelfError::BinaryFile(file.to_path_buf())),
            ReadOutcome::Missing => Err(ShelfError::NotFound(file.to_path_buf())),
        }
    }

    /// Fresh single-file read, the cache-miss path.
    fn fetch(&self, file: &Path) -> ReadOutcome {
        info!(path = %file.display(), "reading text file");

        match self.volume.kind(file) {
            PathKind::Missing => {
                warn!(path = %file.display(), "file doesn't exist");
                return ReadOutcome::Missing;
            }
            PathKind::Dir => {
                warn!(path = %file.display(), "path is a directory");
                return ReadOutcome::Missing;
            }
            PathKind::File => {}
        }

        match self.classify(file) {
            Ok(false) => {}
            Ok(true) => {
                warn!(path = %file.display(), "file is binary");
                return ReadOutcome::Binary;
            }
            Err(err) => {
                warn!(path = %file.display(), error = %err, "classification failed");
                return ReadOutcome::Missing;
            }
        }

        // The detector consumed its reader; open again for the content.
        let mut bytes = Vec::new();
        let read = self
            .volume
            .open(file)
            .and_then(|mut reader| reader.read_to_end(&mut bytes));
        if let Err(err) = read {
            warn!(path = %file.display(), error = %err, "error reading file");
            return ReadOutcome::Missing;
        }

        match String::from_utf8(bytes) {
            Ok(raw) => ReadOutcome::Text(join_lines(&raw)),
            Err(err) => {
                warn!(path = %file.display(), error = %err, "file is not valid UTF-8");
                ReadOutcome::Missing
            }
        }
    }

    // ── Text file write ───────────────────────────────────────────────────

    /// Replace a text file's content under the root, then read it back.
    ///
    /// A missing target is eligible: it is not yet binary. A binary target
    /// is refused before any byte is written and its cache entry stays
    /// untouched, since nothing changed on disk.
    ///
    /// # Errors
    ///
    /// [`ShelfError::NotModified`] when the target is binary;
    /// [`ShelfError::NotFound`] when the write or the read-back fails for
    /// any other reason.
    pub fn write(&self, relative: &str, content: &str) -> Result<String, ShelfError> {
        let file = self.resolver.resolve(relative);
        if !self.resolver.admit(&file) {
            warn!(path = %file.display(), "write refused: path escapes root");
            return Err(ShelfError::NotFound(file));
        }

        info!(path = %file.display(), "writing text file");

        if self.volume.kind(&file) == PathKind::File {
            match self.classify(&file) {
                Ok(false) => {}
                Ok(true) => {
                    warn!(path = %file.display(), "refusing to overwrite binary file");
                    return Err(ShelfError::NotModified(file));
                }
                Err(err) => {
                    warn!(path = %file.display(), error = %err, "classification failed");
                    return Err(ShelfError::NotFound(file));
                }
            }
        }

        let written = self.volume.write(&file, content.as_bytes());

        // On-disk state may have changed even if the write errored partway;
        // the stale entry goes either way.
        self.files.evict(&file);

        if let Err(err) = written {
            warn!(path = %file.display(), error = %err, "unable to save file");
            return Err(ShelfError::NotFound(file));
        }

        match self.read_resolved(&file) {
            Ok(new_content) => Ok(new_content),
            Err(ShelfError::BinaryFile(path)) => Err(ShelfError::NotModified(path)),
            Err(_) => Err(ShelfError::NotFound(file)),
        }
    }

    // ── Classification ────────────────────────────────────────────────────

    /// Classify one path under the root as binary or text.
    ///
    /// Degrades to `false` when the target cannot be opened or read, so the
    /// operation stays total for boundary layers that only want a yes/no.
    pub fn is_binary(&self, relative: &str) -> bool {
        let file = self.resolver.resolve(relative);
        if !self.resolver.admit(&file) {
            warn!(path = %file.display(), "classification refused: path escapes root");
            return false;
        }
        match self.classify(&file) {
            Ok(is_binary) => {
                info!(path = %file.display(), is_binary, "classified path");
                is_binary
            }
            Err(err) => {
                warn!(path = %file.display(), error = %err, "binary check failed");
                false
            }
        }
    }

    fn classify(&self, file: &Path) -> std::io::Result<bool> {
        self.volume.open(file).and_then(detect::is_binary)
    }

    // ── Cache control ─────────────────────────────────────────────────────

    /// Drop every cached listing and file read. The next query for any path
    /// goes back to the volume.
    pub fn clear_cache(&self) {
        info!("clearing all caches");
        self.listings.clear();
        self.files.clear();
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Join a file's lines with single `\n` separators. Normalizes CRLF line
/// breaks and drops a trailing newline, matching a read-lines-then-join
/// reconstruction.
fn join_lines(raw: &str) -> String {
    raw.lines().collect::<Vec<_>>().join("\n")
}
