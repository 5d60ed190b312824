//! Home and repository resolution.
//!
//! stew has no configuration file. Its two inputs, the home directory and the
//! repository root, come from CLI flags or the environment and are resolved
//! once at startup into a [`Settings`] value that is passed down explicitly.
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::paths;

/// Environment variable naming the repository, relative to home.
pub const REPOSITORY_ENV: &str = "STEW_REPOSITORY";

/// Repository directory used when [`REPOSITORY_ENV`] is unset or empty.
pub const DEFAULT_REPOSITORY: &str = ".dotfiles";

/// Resolved home directory and repository root.
///
/// Both paths are absolute and lexically normalized.
///
/// # Examples
///
/// ```
/// use stew_cli::config::Settings;
///
/// let settings = Settings::new("/home/u", "/home/u/.dotfiles");
/// assert_eq!(settings.package_dir("zsh"), std::path::Path::new("/home/u/.dotfiles/zsh"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The user's home directory.
    pub home: PathBuf,
    /// The managed dotfiles repository.
    pub repository: PathBuf,
}

impl Settings {
    /// Build settings from explicit paths, normalizing them lexically.
    #[must_use]
    pub fn new(home: impl AsRef<Path>, repository: impl AsRef<Path>) -> Self {
        Self {
            home: paths::normalize(home.as_ref()),
            repository: paths::normalize(repository.as_ref()),
        }
    }

    /// Resolve settings from CLI overrides and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UndefinedHome`] if no home directory is known,
    /// or [`ConfigError::Resolve`] if a path cannot be made absolute.
    pub fn resolve(
        home_override: Option<&Path>,
        repository_override: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        Self::resolve_with(home_override, repository_override, |key| {
            std::env::var(key).ok()
        })
    }

    /// Resolve settings using `lookup` in place of the process environment.
    ///
    /// Precedence for home: `home_override`, then `HOME` (on Windows
    /// `USERPROFILE` first). Precedence for the repository:
    /// `repository_override`, then home joined with `STEW_REPOSITORY`, then
    /// home joined with [`DEFAULT_REPOSITORY`]. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// See [`Settings::resolve`].
    pub fn resolve_with(
        home_override: Option<&Path>,
        repository_override: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let home = match home_override {
            Some(home) => home.to_path_buf(),
            None => {
                let from_env = if cfg!(windows) {
                    non_empty("USERPROFILE").or_else(|| non_empty("HOME"))
                } else {
                    non_empty("HOME")
                };
                PathBuf::from(from_env.ok_or(ConfigError::UndefinedHome)?)
            }
        };
        let home = absolute("home", &home)?;

        let repository = match repository_override {
            Some(repository) => repository.to_path_buf(),
            None => home.join(
                non_empty(REPOSITORY_ENV).unwrap_or_else(|| DEFAULT_REPOSITORY.to_string()),
            ),
        };
        let repository = absolute("repository", &repository)?;

        Ok(Self { home, repository })
    }

    /// Directory of `package` inside the repository.
    #[must_use]
    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.repository.join(package)
    }
}

fn absolute(what: &'static str, path: &Path) -> Result<PathBuf, ConfigError> {
    paths::absolute(path).map_err(|source| ConfigError::Resolve {
        what,
        path: path.display().to_string(),
        source,
    })
}
