//! Relocation requests and the plans derived from them.
use std::path::PathBuf;

use super::PackageName;

/// One source path to move into one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationRequest {
    /// Path to an existing file or directory, absolute or relative to the
    /// current directory.
    pub source: PathBuf,
    /// Package that receives the file.
    pub package: PackageName,
}

impl RelocationRequest {
    /// Create a request.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, package: PackageName) -> Self {
        Self {
            source: source.into(),
            package,
        }
    }
}

/// Where a request's source will go.
///
/// Derived deterministically from a [`RelocationRequest`] and the settings;
/// `destination_file` is always strictly inside the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationPlan {
    /// Absolute, normalized source path.
    pub source: PathBuf,
    /// Receiving package.
    pub package: PackageName,
    /// Source directory relative to home; empty for direct children of home.
    pub relative_dir: PathBuf,
    /// `repository/package/relative_dir`.
    pub destination_dir: PathBuf,
    /// `destination_dir/basename(source)`.
    pub destination_file: PathBuf,
}
