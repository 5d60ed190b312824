//! Console and log-file output.
//!
//! Commands talk to a [`Log`]. The [`Logger`] implementation turns each call
//! into a [`tracing`] event, and [`init_subscriber`] decides where events go:
//! formatted lines on the terminal, and every event down to `debug` in
//! `$XDG_CACHE_HOME/stew/<command>.log`.

mod console;
mod event;
mod file;
mod logger;
mod types;

use std::io::IsTerminal as _;
use std::path::PathBuf;

pub use file::log_file_path;
pub use logger::Logger;
pub use types::{ItemRecord, ItemStatus, Log};

/// Environment variable holding a `tracing` filter for console output.
pub const LOG_ENV: &str = "STEW_LOG";

/// Install the global subscriber for `command`.
///
/// Returns the log file path when the file could be created. A missing
/// cache directory only costs the file, never the run.
pub fn init_subscriber(verbose: bool, command: &str) -> Option<PathBuf> {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(console::ConsoleFormat)
        .with_ansi(std::io::stdout().is_terminal())
        .with_writer(make_writer)
        .with_filter(console_filter);

    let path = log_file_path(command);
    let file_layer = path
        .as_deref()
        .and_then(|p| file::FileLayer::create(p, command).ok());
    let log_file = file_layer.as_ref().and(path);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer.map(|l| l.with_filter(LevelFilter::DEBUG)))
        .init();

    log_file
}

/// A [`Logger`] whose events go only to a log file in a fresh temporary
/// directory, through a subscriber scoped to the current thread.
///
/// Keep the guard alive for as long as the logger is used.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn file_logger() -> (Logger, tempfile::TempDir, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};

    let tmp = tempfile::tempdir().expect("temp dir");
    let path = tmp.path().join("stew").join("test.log");
    let layer = file::FileLayer::create(&path, "test").expect("log file");
    let subscriber = tracing_subscriber::registry().with(layer.with_filter(LevelFilter::DEBUG));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (Logger::new(Some(path)), tmp, guard)
}

/// A [`Log`] that keeps every message in memory for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingLog {
    lines: std::sync::Mutex<Vec<(&'static str, String)>>,
    items: std::sync::Mutex<Vec<ItemRecord>>,
}

#[cfg(test)]
impl RecordingLog {
    fn push(&self, level: &'static str, msg: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, msg.to_string()));
        }
    }

    /// Messages logged at `level` (`"info"`, `"dry_run"`, ...), in order.
    pub(crate) fn messages(&self, level: &str) -> Vec<String> {
        self.lines.lock().map_or_else(
            |_| vec![],
            |lines| {
                lines
                    .iter()
                    .filter(|(l, _)| *l == level)
                    .map(|(_, m)| m.clone())
                    .collect()
            },
        )
    }

    pub(crate) fn items(&self) -> Vec<ItemRecord> {
        self.items.lock().map_or_else(|_| vec![], |t| t.clone())
    }
}

#[cfg(test)]
impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn ok(&self, msg: &str) {
        self.push("ok", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
    fn record_item(&self, name: &str, status: ItemStatus, message: Option<&str>) {
        if let Ok(mut items) = self.items.lock() {
            items.push(ItemRecord {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}
