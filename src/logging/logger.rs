//! The [`Log`] implementation used by the binary.
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::event::{DRY_RUN_TARGET, OK_TARGET, STAGE_TARGET};
use super::types::{ItemRecord, ItemStatus, Log};

/// Emits [`tracing`] events and remembers per-item results for the summary.
#[derive(Debug, Default)]
pub struct Logger {
    items: Mutex<Vec<ItemRecord>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// A logger whose summary points at `log_file`, as returned by
    /// [`init_subscriber`](super::init_subscriber).
    #[must_use]
    pub const fn new(log_file: Option<PathBuf>) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// The log file this run writes to, if any.
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Recorded items, in order.
    #[must_use]
    pub fn items(&self) -> Vec<ItemRecord> {
        self.items.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log one line per recorded item, then the totals and the log file.
    ///
    /// Does nothing when no item was recorded.
    pub fn print_summary(&self) {
        let items = self.items();
        if items.is_empty() {
            return;
        }

        self.stage("Summary");
        let (mut ok, mut dry_run, mut failed) = (0, 0, 0);
        for item in &items {
            match item.status {
                ItemStatus::Ok => ok += 1,
                ItemStatus::DryRun => dry_run += 1,
                ItemStatus::Failed => failed += 1,
            }
            let line = match &item.message {
                Some(msg) => format!("{:<7} {} ({msg})", item.status, item.name),
                None => format!("{:<7} {}", item.status, item.name),
            };
            if item.status == ItemStatus::Failed {
                self.warn(&line);
            } else {
                self.info(&line);
            }
        }

        self.info(&format!(
            "{} item(s): {ok} ok, {dry_run} dry-run, {failed} failed",
            items.len()
        ));
        if let Some(path) = &self.log_file {
            self.debug(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn ok(&self, msg: &str) {
        tracing::info!(target: OK_TARGET, "{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    fn record_item(&self, name: &str, status: ItemStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.items.lock() {
            guard.push(ItemRecord {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}
