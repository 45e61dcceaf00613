use std::path::PathBuf;

use crate::error::ShelfError;
use crate::resolve::Resolver;
use crate::service::Shelf;
use crate::volume::{OsVolume, PathKind, Volume};

// ---------------------------------------------------------------------------
// ShelfBuilder
// ---------------------------------------------------------------------------

/// Configures and constructs a [`Shelf`].
///
/// Created via [`shelf::at()`](crate::at). Configure with chained builder
/// methods, then call [`build()`](ShelfBuilder::build).
///
/// # Example
///
/// ```rust,ignore
/// let shelf = shelf::at("/srv/data")
///     .cache_misses(false)
///     .build()?;
/// ```
pub struct ShelfBuilder {
    root: PathBuf,
    volume: Option<Box<dyn Volume>>,
    confine: bool,
    cache_misses: bool,
}

impl ShelfBuilder {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self {
            root,
            volume: None,
            confine: true,
            cache_misses: true,
        }
    }

    // ── Volume ────────────────────────────────────────────────────────────

    /// Back the service with a custom [`Volume`].
    ///
    /// Defaults to [`OsVolume`], the host filesystem. Tests substitute
    /// counting or in-memory volumes to observe cache behavior.
    pub fn volume(mut self, v: impl Volume + 'static) -> Self {
        self.volume = Some(Box::new(v));
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Confine resolved paths to the root (the default).
    ///
    /// Path resolution itself is plain concatenation, so with confinement
    /// off a `..` segment can reach outside the root. Pass `false` only
    /// when callers are trusted and that reach is wanted.
    pub fn confine(mut self, yes: bool) -> Self {
        self.confine = yes;
        self
    }

    /// Cache negative outcomes (missing files, binary refusals) the same
    /// way as successful reads (the default).
    ///
    /// With miss-caching on, a file created after a failed read stays
    /// invisible until a write evicts the entry or [`Shelf::clear_cache`]
    /// runs. Pass `false` to recompute failed lookups on every call.
    pub fn cache_misses(mut self, yes: bool) -> Self {
        self.cache_misses = yes;
        self
    }

    // ── Build ─────────────────────────────────────────────────────────────

    /// Validate the configuration and construct the service.
    ///
    /// # Errors
    ///
    /// [`ShelfError::InvalidRoot`] when the root path is not absolute or is
    /// not an existing directory on the configured volume.
    pub fn build(self) -> Result<Shelf, ShelfError> {
        let volume = self.volume.unwrap_or_else(|| Box::new(OsVolume));

        if !self.root.is_absolute() || volume.kind(&self.root) != PathKind::Dir {
            return Err(ShelfError::InvalidRoot(self.root));
        }

        let resolver = Resolver::new(self.root, self.confine);
        Ok(Shelf::new(resolver, volume, self.cache_misses))
    }
}
