//! The reporting interface shared by the relocator and the commands.
use std::fmt;

/// How one package or check ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    /// Done.
    Ok,
    /// Only logged because of `--dry-run`.
    DryRun,
    /// Did not complete.
    Failed,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Ok => "ok",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        })
    }
}

/// One line of the end-of-run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    /// Package name or check name.
    pub name: String,
    /// How it ended.
    pub status: ItemStatus,
    /// Why it failed, if it did.
    pub message: Option<String>,
}

/// Where stew reports progress.
///
/// [`Logger`](super::Logger) turns every call into a [`tracing`] event;
/// tests use an in-memory recorder instead.
pub trait Log: Send + Sync {
    /// A section header.
    fn stage(&self, msg: &str);
    /// Progress.
    fn info(&self, msg: &str);
    /// A passed check or finished step.
    fn ok(&self, msg: &str);
    /// Detail shown only with `--verbose`.
    fn debug(&self, msg: &str);
    /// Something the user should look at.
    fn warn(&self, msg: &str);
    /// Something that failed.
    fn error(&self, msg: &str);
    /// A change that `--dry-run` held back.
    fn dry_run(&self, msg: &str);
    /// Add a line to the summary.
    fn record_item(&self, name: &str, status: ItemStatus, message: Option<&str>);
}
