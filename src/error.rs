//! Domain-specific error types for stew.
//!
//! Internal modules return typed errors built with [`thiserror`]; command
//! handlers at the CLI boundary convert them to [`anyhow::Error`] via the
//! standard `?` operator.
//!
//! # Error types
//!
//! ```text
//! ConfigError    : home / repository resolution
//! RelocateError  : adopt path remapping and moves (from `relocate`)
//! AdoptError     : batch adopt with partial completion (from `relocate`)
//! ToolError      : stow / git subprocesses
//! ```

use thiserror::Error;

pub use crate::relocate::{AdoptError, RelocateError};

/// Errors that arise while resolving home and repository paths.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither `--home` nor the home environment variable is set.
    #[error("home directory is undefined: set HOME or pass --home")]
    UndefinedHome,

    /// A configured path could not be made absolute.
    #[error("cannot resolve {what} path {path}: {source}")]
    Resolve {
        /// Which setting was being resolved (`"home"`, `"repository"`).
        what: &'static str,
        /// The path as given.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from the external linking and version-control tools.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The program is not on `PATH`.
    #[error("{program} command not found")]
    NotFound {
        /// Name of the missing program.
        program: String,
    },

    /// The program ran but exited unsuccessfully.
    #[error("{program} {action} failed (exit {code}): {stderr}")]
    Failed {
        /// Name of the program.
        program: String,
        /// What the program was asked to do (e.g. `"pull"`, `"link zsh"`).
        action: String,
        /// Exit code, or `-1` when killed by a signal.
        code: i32,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}
