//! GNU Stow: links packages from the repository into home.
use anyhow::Result;

use super::run_checked;
use crate::config::Settings;
use crate::exec::Executor;

/// Program name looked up on `PATH`.
pub const PROGRAM: &str = "stow";

/// Stow bound to one repository (`-d`) and target (`-t`).
pub struct Stow<'a> {
    executor: &'a dyn Executor,
    settings: &'a Settings,
}

impl std::fmt::Debug for Stow<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stow")
            .field("executor", &self.executor)
            .field("settings", &self.settings)
            .finish()
    }
}

impl<'a> Stow<'a> {
    /// Create a wrapper that runs stow through `executor`.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor, settings: &'a Settings) -> Self {
        Self { executor, settings }
    }

    /// Arguments for linking (or, with `delete`, unlinking) `package`.
    #[must_use]
    pub fn args(&self, package: &str, delete: bool) -> Vec<String> {
        let mut args = Vec::with_capacity(6);
        if delete {
            args.push("-D".to_string());
        }
        args.extend([
            "-d".to_string(),
            self.settings.repository.display().to_string(),
            "-t".to_string(),
            self.settings.home.display().to_string(),
            package.to_string(),
        ]);
        args
    }

    /// Create the symlinks for `package` in home.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolError`](crate::error::ToolError) if stow is missing or
    /// exits non-zero.
    pub fn link(&self, package: &str) -> Result<()> {
        self.run(package, false, "link")
    }

    /// Remove the symlinks for `package` from home.
    ///
    /// # Errors
    ///
    /// See [`Stow::link`].
    pub fn unlink(&self, package: &str) -> Result<()> {
        self.run(package, true, "unlink")
    }

    fn run(&self, package: &str, delete: bool, verb: &str) -> Result<()> {
        let args = self.args(package, delete);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_checked(
            self.executor,
            &self.settings.repository,
            PROGRAM,
            &args,
            &format!("{verb} {package}"),
        )?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::exec::test_helpers::MockExecutor;

    fn settings() -> Settings {
        Settings::new("/home/u", "/home/u/.dotfiles")
    }

    #[test]
    fn link_passes_directory_and_target() {
        let exec = MockExecutor::new();
        let settings = settings();
        Stow::new(&exec, &settings).link("zsh").unwrap();

        let calls = exec.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "stow");
        assert_eq!(
            calls[0].args,
            ["-d", "/home/u/.dotfiles", "-t", "/home/u", "zsh"]
        );
        assert_eq!(calls[0].dir, settings.repository);
    }

    #[test]
    fn unlink_adds_delete_flag() {
        let exec = MockExecutor::new();
        let settings = settings();
        Stow::new(&exec, &settings).unlink("nvim").unwrap();
        assert_eq!(
            exec.calls()[0].args,
            ["-D", "-d", "/home/u/.dotfiles", "-t", "/home/u", "nvim"]
        );
    }

    #[test]
    fn conflict_is_reported_with_package() {
        let exec = MockExecutor::with_responses(vec![(
            false,
            "WARNING! stowing zsh would cause conflicts",
        )]);
        let settings = settings();
        let err = Stow::new(&exec, &settings).link("zsh").unwrap_err();
        let Some(ToolError::Failed { action, stderr, .. }) = err.downcast_ref::<ToolError>() else {
            panic!("expected ToolError::Failed, got {err:#}");
        };
        assert_eq!(action, "link zsh");
        assert!(stderr.contains("conflicts"));
    }
}
