//! Subcommand implementations.
//!
//! Every handler receives a [`Context`] holding the resolved settings and the
//! injected collaborators, and returns [`anyhow::Result`]. Handlers that
//! process several packages or checks record a task per item and fail at the
//! end if any item failed; the summary is printed by `main`.
pub mod adopt;
pub mod completions;
pub mod doctor;
pub mod link;
pub mod list;
pub mod status;
pub mod sync;
pub mod unlink;
pub mod version;

use anyhow::Result;

use crate::config::Settings;
use crate::exec::Executor;
use crate::logging::{ItemStatus, Log};

/// Everything a command needs, resolved once at startup.
pub struct Context<'a> {
    /// Home directory and repository root.
    pub settings: &'a Settings,
    /// Reporting sink.
    pub log: &'a dyn Log,
    /// Subprocess runner for stow and git.
    pub executor: &'a dyn Executor,
    /// Log mutating actions instead of performing them.
    pub dry_run: bool,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("settings", &self.settings)
            .field("log", &"<dyn Log>")
            .field("executor", &self.executor)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl<'a> Context<'a> {
    /// Bundle the collaborators for a command.
    #[must_use]
    pub const fn new(
        settings: &'a Settings,
        log: &'a dyn Log,
        executor: &'a dyn Executor,
        dry_run: bool,
    ) -> Self {
        Self {
            settings,
            log,
            executor,
            dry_run,
        }
    }

    /// Fail unless the repository directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error naming the missing repository.
    pub fn require_repository(&self) -> Result<()> {
        let repository = &self.settings.repository;
        if !repository.is_dir() {
            anyhow::bail!(
                "repository {} does not exist (set STEW_REPOSITORY or pass --repository)",
                repository.display()
            );
        }
        Ok(())
    }
}

/// Tally of per-item results for a command that processes several items.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Items that succeeded or would succeed in a dry run.
    pub ok: usize,
    /// Items that failed.
    pub failed: usize,
}

impl Outcome {
    /// Record one item's result in the summary and the tally.
    pub fn record(&mut self, log: &dyn Log, name: &str, result: &Result<ItemStatus>) {
        match result {
            Ok(status) => {
                self.ok += 1;
                log.record_item(name, *status, None);
            }
            Err(e) => {
                self.failed += 1;
                log.error(&format!("{name}: {e:#}"));
                log.record_item(name, ItemStatus::Failed, Some(&format!("{e:#}")));
            }
        }
    }

    /// Turn the tally into the command's result.
    ///
    /// # Errors
    ///
    /// Returns an error if any item failed.
    pub fn finish(self, what: &str) -> Result<()> {
        if self.failed > 0 {
            anyhow::bail!("{} {what} failed", self.failed);
        }
        Ok(())
    }
}
