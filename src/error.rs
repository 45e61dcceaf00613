use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    // Lookup
    #[error("directory not found")]
    DirectoryNotFound(PathBuf),

    #[error("file not found")]
    NotFound(PathBuf),

    // Classification
    #[error("binary file")]
    BinaryFile(PathBuf),

    // Write
    #[error("not modified")]
    NotModified(PathBuf),

    // Config
    #[error("invalid root")]
    InvalidRoot(PathBuf),
}

impl ShelfError {
    /// The path this error occurred at.
    /// Callers use this to present "Not found: <path>" without pattern matching on variants.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::DirectoryNotFound(p)
            | Self::NotFound(p)
            | Self::BinaryFile(p)
            | Self::NotModified(p)
            | Self::InvalidRoot(p) => p,
        }
    }

    /// Whether the target resource exists despite the operation failing.
    ///
    /// `BinaryFile` and `NotModified` mean the file is there but refuses a
    /// text operation. Boundary layers map these to an empty success with a
    /// marker status rather than a genuine absence.
    pub fn resource_exists(&self) -> bool {
        matches!(self, Self::BinaryFile(_) | Self::NotModified(_))
    }
}
