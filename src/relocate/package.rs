//! Package names.
use std::fmt;
use std::path::{Component, Path};

use super::RelocateError;

/// Name of a package: exactly one directory directly under the repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    /// Validate `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RelocateError::InvalidPackageName`] if `name` is empty, is
    /// `.` or `..`, or contains a path separator.
    pub fn new(name: impl Into<String>) -> Result<Self, RelocateError> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("must not be empty")
        } else if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
            Some("must not contain a path separator")
        } else if !matches!(
            Path::new(&name).components().collect::<Vec<_>>().as_slice(),
            [Component::Normal(_)]
        ) {
            Some("must name a directory")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(RelocateError::InvalidPackageName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    /// Derive the default package name from the base name of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`RelocateError::InvalidPackageName`] if `source` has no base
    /// name (e.g. `/` or `..`).
    pub fn from_source(source: &Path) -> Result<Self, RelocateError> {
        let base = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(base)
    }

    /// The name as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for PackageName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}
