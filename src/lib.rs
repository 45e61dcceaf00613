//! # shelf
//!
//! Embeddable file-access core: root-scoped listing, text read/write,
//! cache-aside.
//!
//! shelf owns the part of a file-serving API with actual decisions in it:
//! path resolution under a fixed root, directory enumeration with per-entry
//! binary/text classification, single-file text read and write, and the
//! cache that must stay consistent with writes. It does **not** own the HTTP
//! routing, request marshaling, or authentication; those belong to the
//! caller. Relative paths arrive already decoded (`%20` and friends are the
//! boundary layer's problem).
//!
//! # Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::io::{Cursor, Read};
//! use std::path::{Path, PathBuf};
//! use std::sync::Mutex;
//!
//! use shelf::{Child, ListFilter, PathKind, Volume};
//!
//! // A minimal in-memory volume for demonstration: one flat directory.
//! struct MemVolume(Mutex<HashMap<PathBuf, Vec<u8>>>);
//!
//! impl Volume for MemVolume {
//!     fn kind(&self, path: &Path) -> PathKind {
//!         if path == Path::new("/data") {
//!             PathKind::Dir
//!         } else if self.0.lock().unwrap().contains_key(path) {
//!             PathKind::File
//!         } else {
//!             PathKind::Missing
//!         }
//!     }
//!
//!     fn children(&self, path: &Path) -> std::io::Result<Vec<Child>> {
//!         Ok(self.0.lock().unwrap().keys()
//!             .filter(|p| p.parent() == Some(path))
//!             .map(|p| Child {
//!                 name: p.file_name().unwrap().to_string_lossy().into_owned(),
//!                 is_dir: false,
//!             })
//!             .collect())
//!     }
//!
//!     fn open(&self, path: &Path) -> std::io::Result<Box<dyn Read>> {
//!         match self.0.lock().unwrap().get(path) {
//!             Some(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
//!             None => Err(std::io::Error::from(std::io::ErrorKind::NotFound)),
//!         }
//!     }
//!
//!     fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
//!         self.0.lock().unwrap().insert(path.to_path_buf(), bytes.to_vec());
//!         Ok(())
//!     }
//! }
//!
//! let mut files = HashMap::new();
//! files.insert(PathBuf::from("/data/notes.txt"), b"hello".to_vec());
//!
//! let shelf = shelf::at("/data")
//!     .volume(MemVolume(Mutex::new(files)))
//!     .build()
//!     .unwrap();
//!
//! let entries = shelf.list("", &ListFilter::default()).unwrap();
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].name, "notes.txt");
//! assert!(!entries[0].is_binary);
//!
//! assert_eq!(shelf.read("notes.txt").unwrap(), "hello");
//!
//! shelf.write("notes.txt", "bye").unwrap();
//! assert_eq!(shelf.read("notes.txt").unwrap(), "bye");
//! ```
//!
//! # Custom Volumes
//!
//! Implement [`Volume`] to serve anything with directory-and-file shape:
//! the host filesystem (the default, [`OsVolume`]), an in-memory tree for
//! tests, an archive, a remote mount. The service only ever touches the
//! volume through the trait, so cache behavior stays observable in tests.
//!
//! # Caching
//!
//! Listings and file reads are memoized per resolved path. A write evicts
//! exactly the written file's entry; [`Shelf::clear_cache`] empties
//! everything. Memoization is best-effort, not singleflight: two concurrent
//! misses on one path may both hit the volume. Negative outcomes are cached
//! too by default; see [`ShelfBuilder::cache_misses`].

#![forbid(unsafe_code)]

pub mod detect;

mod builder;
mod cache;
mod entry;
mod error;
mod resolve;
mod service;
mod volume;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::ShelfBuilder;
pub use entry::{FileEntry, ListFilter};
pub use error::ShelfError;
pub use service::Shelf;
pub use volume::{Child, OsVolume, PathKind, Volume};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`ShelfBuilder`] rooted at `root`.
///
/// `root` must be an absolute path to an existing directory; anything else
/// fails at [`build()`](ShelfBuilder::build). The root is fixed for the
/// lifetime of the service.
///
/// # Example
///
/// ```rust,no_run
/// use shelf::ListFilter;
///
/// let shelf = shelf::at("/srv/data").build().unwrap();
/// for entry in shelf.list("reports", &ListFilter::default()).unwrap() {
///     println!("{} (folder: {})", entry.name, entry.is_folder);
/// }
/// ```
pub fn at(root: impl Into<std::path::PathBuf>) -> ShelfBuilder {
    ShelfBuilder::new(root.into())
}
