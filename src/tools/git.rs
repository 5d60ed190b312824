//! Git operations on the repository.
use anyhow::Result;

use super::run_checked;
use crate::config::Settings;
use crate::exec::Executor;

/// Program name looked up on `PATH`.
pub const PROGRAM: &str = "git";

/// Git with the repository as working directory.
pub struct Git<'a> {
    executor: &'a dyn Executor,
    settings: &'a Settings,
}

impl std::fmt::Debug for Git<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("executor", &self.executor)
            .field("repository", &self.settings.repository)
            .finish()
    }
}

impl<'a> Git<'a> {
    /// Create a wrapper that runs git through `executor`.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor, settings: &'a Settings) -> Self {
        Self { executor, settings }
    }

    /// `git status`, returning everything git printed.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolError`](crate::error::ToolError) if git is missing or
    /// exits non-zero.
    pub fn status(&self) -> Result<String> {
        let result = self.run(&["status"])?;
        Ok(result.stdout + &result.stderr)
    }

    /// `git pull`.
    ///
    /// # Errors
    ///
    /// See [`Git::status`].
    pub fn pull(&self) -> Result<String> {
        Ok(self.run(&["pull"])?.stdout)
    }

    /// `git push`.
    ///
    /// # Errors
    ///
    /// See [`Git::status`].
    pub fn push(&self) -> Result<String> {
        Ok(self.run(&["push"])?.stdout)
    }

    fn run(&self, args: &[&str]) -> Result<crate::exec::ExecResult> {
        run_checked(
            self.executor,
            &self.settings.repository,
            PROGRAM,
            args,
            &args.join(" "),
        )
    }
}
