use std::path::{Component, Path, PathBuf};

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Composes the configured root with caller-supplied relative paths.
///
/// `pub(crate)`: callers hand relative paths to the service; they never see
/// resolved paths except inside results and errors.
pub(crate) struct Resolver {
    root: PathBuf,
    confine: bool,
}

impl Resolver {
    pub fn new(root: PathBuf, confine: bool) -> Self {
        Self { root, confine }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join the root and `relative` with a single separator.
    ///
    /// Pure and total: no filesystem access, no `.`/`..` normalization, no
    /// symlink resolution. An empty `relative` resolves to the root itself.
    /// Escaping segments are caught separately by [`admit`](Self::admit), not
    /// here.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        let relative = relative.trim_start_matches('/');
        if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        }
    }

    /// Whether a resolved path is allowed through.
    ///
    /// Plain concatenation lets `../..` segments escape the root. When
    /// confinement is on (the default) the resolved path is lexically
    /// normalized and must stay prefixed by the root; builders can opt out
    /// with `confine(false)`.
    pub fn admit(&self, resolved: &Path) -> bool {
        if !self.confine {
            return true;
        }
        normalized(resolved).starts_with(normalized(&self.root))
    }
}

/// Lexically fold `.` and `..` components. Leading `..` at the filesystem
/// root stays at the root, so an escape attempt can only normalize to a path
/// outside the configured root, never panic.
fn normalized(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
