//! Typed errors for relocation.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::RelocationPlan;

/// Why a single source could not be relocated.
///
/// Every variant except [`CreateDirFailed`](Self::CreateDirFailed) and
/// [`MoveFailed`](Self::MoveFailed) is raised while planning, before anything
/// on disk changes.
#[derive(Error, Debug)]
pub enum RelocateError {
    /// The source path could not be made absolute.
    #[error("cannot resolve {path}: {source}")]
    Resolve {
        /// The path as given.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The source path does not exist.
    #[error("{path} does not exist")]
    NotFound {
        /// Absolute source path.
        path: PathBuf,
    },

    /// The source exists but could not be inspected.
    #[error("cannot inspect {path}: {source}")]
    Inspect {
        /// Absolute source path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The source is not strictly inside the home directory.
    #[error("{path} is not inside the home directory {home}")]
    OutsideHome {
        /// Absolute source path.
        path: PathBuf,
        /// The home directory.
        home: PathBuf,
    },

    /// The source already lives inside the repository.
    #[error("{path} is already inside the repository")]
    InsideRepository {
        /// Absolute source path.
        path: PathBuf,
    },

    /// The source is the repository or one of its ancestors.
    #[error("{path} contains the repository {repository}")]
    ContainsRepository {
        /// Absolute source path.
        path: PathBuf,
        /// The repository root.
        repository: PathBuf,
    },

    /// The source is a symlink into the repository, i.e. already linked.
    #[error("{path} is already managed (links to {target})")]
    AlreadyManaged {
        /// Absolute source path.
        path: PathBuf,
        /// Where the link points.
        target: PathBuf,
    },

    /// Several sources were given without an explicit package name.
    #[error("package name must be provided when adopting multiple files ({count} given)")]
    AmbiguousPackageName {
        /// Number of sources.
        count: usize,
    },

    /// The package name would not name a single directory in the repository.
    #[error("invalid package name '{name}': {reason}")]
    InvalidPackageName {
        /// The rejected name.
        name: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Something already exists at the destination.
    #[error("{path} already exists in the repository")]
    DestinationExists {
        /// The destination file.
        path: PathBuf,
    },

    /// Two sources in one batch are the same path or nested in each other.
    #[error("{path} overlaps another path given in the same batch")]
    DuplicateSource {
        /// Absolute source path.
        path: PathBuf,
    },

    /// The destination directory could not be created.
    #[error("cannot create {path}: {source}")]
    CreateDirFailed {
        /// Directory being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The rename failed; the source is untouched.
    #[error("cannot move {from} to {to}: {source}")]
    MoveFailed {
        /// Absolute source path.
        from: PathBuf,
        /// Destination file.
        to: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A batch adopt stopped at `source` after moving the files in `completed`.
///
/// Completed moves are not rolled back.
#[derive(Error, Debug)]
#[error("{source} ({} file(s) already moved)", .completed.len())]
pub struct AdoptError {
    /// Relocations that finished before the failure, in order.
    pub completed: Vec<RelocationPlan>,
    /// The failure that stopped the batch.
    #[source]
    pub source: RelocateError,
}

impl AdoptError {
    /// Wrap an error raised before any file was moved.
    #[must_use]
    pub const fn before_any_move(source: RelocateError) -> Self {
        Self {
            completed: Vec::new(),
            source,
        }
    }
}
