//! The per-command log file.
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

use super::event::{Kind, message};

/// Where the log for `command` goes: `$XDG_CACHE_HOME/stew/<command>.log`,
/// falling back to `~/.cache/stew/<command>.log`.
#[must_use]
pub fn log_file_path(command: &str) -> Option<PathBuf> {
    log_file_path_with(command, |key| std::env::var(key).ok())
}

/// [`log_file_path`] with `lookup` in place of the process environment.
pub(super) fn log_file_path_with(
    command: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<PathBuf> {
    let set = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);
    let cache = set("XDG_CACHE_HOME").or_else(|| {
        set("HOME")
            .or_else(|| set("USERPROFILE"))
            .map(|home| home.join(".cache"))
    })?;
    Some(cache.join("stew").join(format!("{command}.log")))
}

/// Appends every event, tagged and timestamped, to one file.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<File>,
}

impl FileLayer {
    /// Truncate `path`, creating its directory, and write a header line.
    pub(super) fn create(path: &Path, command: &str) -> io::Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        writeln!(
            file,
            "# stew {} {command} started {}",
            crate::commands::version::version(),
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        )?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

/// One log file line.
fn line(timestamp: &str, kind: Kind, msg: &str) -> String {
    match kind.tag() {
        "" => format!("{timestamp} {msg}"),
        tag => format!("{timestamp} {tag} {msg}"),
    }
}

impl<S: tracing::Subscriber> Layer<S> for FileLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let timestamp = chrono::Utc::now().format("%H:%M:%S").to_string();
        let line = line(&timestamp, Kind::of(event), &message(event));
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }
}
