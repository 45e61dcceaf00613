use std::fs;
use std::io::Read;
use std::path::Path;

// ---------------------------------------------------------------------------
// Volume
// ---------------------------------------------------------------------------

/// What a path currently is on a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Nothing at this path.
    Missing,

    /// A directory.
    Dir,

    /// A regular file (or anything readable that isn't a directory).
    File,
}

/// A named child yielded by [`Volume::children`].
#[derive(Debug, Clone)]
pub struct Child {
    /// Base name of the child.
    pub name: String,

    /// True iff the child is a directory.
    pub is_dir: bool,
}

/// The filesystem primitives the service is built on.
///
/// Implement this to back the service with something other than the host
/// filesystem, such as an in-memory tree for tests or a read-only snapshot.
/// The default implementation is [`OsVolume`].
///
/// # Thread Safety
///
/// `Send + Sync` are required: one service instance serves concurrent
/// callers, and every operation goes through the shared volume.
///
/// # Error Handling
///
/// `children`, `open` and `write` return plain `io::Result`; the service
/// decides how each failure degrades (skip a child, report not-found). A
/// `Volume` should never panic on a missing or unreadable path.
pub trait Volume: Send + Sync {
    /// Classify what sits at `path` right now.
    fn kind(&self, path: &Path) -> PathKind;

    /// Enumerate the immediate children of a directory, in whatever order
    /// the backing store yields them. No recursion, no sort guarantee.
    fn children(&self, path: &Path) -> std::io::Result<Vec<Child>>;

    /// Open a file for reading.
    fn open(&self, path: &Path) -> std::io::Result<Box<dyn Read>>;

    /// Replace the file's content with `bytes`, creating it if missing.
    fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()>;
}

// ---------------------------------------------------------------------------
// OsVolume
// ---------------------------------------------------------------------------

/// The real host filesystem.
pub struct OsVolume;

impl Volume for OsVolume {
    fn kind(&self, path: &Path) -> PathKind {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => PathKind::Dir,
            Ok(_) => PathKind::File,
            Err(_) => PathKind::Missing,
        }
    }

    fn children(&self, path: &Path) -> std::io::Result<Vec<Child>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            out.push(Child {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        Ok(out)
    }

    fn open(&self, path: &Path) -> std::io::Result<Box<dyn Read>> {
        Ok(Box::new(fs::File::open(path)?))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        fs::write(path, bytes)
    }
}
