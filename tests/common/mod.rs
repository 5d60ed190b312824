// Shared helpers for integration tests.
//
// Provides a temporary home directory with a dotfiles repository inside it,
// a fluent builder for populating both, and in-memory stand-ins for the
// logger and the subprocess executor so tests can drive commands through
// the public API without touching the real environment.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use stew_cli::config::Settings;
use stew_cli::exec::{ExecResult, Executor};
use stew_cli::logging::{ItemStatus, Log};

/// An isolated home directory backed by a [`tempfile::TempDir`].
///
/// The repository lives at `home/.dotfiles` and is created empty.
#[derive(Debug)]
pub struct Sandbox {
    /// Temporary directory holding the home directory.
    pub root: tempfile::TempDir,
    /// Settings pointing at the sandboxed home and repository.
    pub settings: Settings,
}

impl Sandbox {
    /// Create a sandbox with an empty repository.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let home = root.path().join("home");
        let settings = Settings::new(&home, home.join(".dotfiles"));
        std::fs::create_dir_all(&settings.repository).expect("create repository");
        Self { root, settings }
    }

    /// The home directory.
    pub fn home(&self) -> &Path {
        &self.settings.home
    }

    /// The repository root.
    pub fn repo(&self) -> &Path {
        &self.settings.repository
    }

    /// Read a file below home.
    pub fn read_home(&self, rel: &str) -> String {
        std::fs::read_to_string(self.home().join(rel)).expect("read home file")
    }

    /// Read a file below the repository.
    pub fn read_repo(&self, rel: &str) -> String {
        std::fs::read_to_string(self.repo().join(rel)).expect("read repository file")
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}

/// Fluent builder for [`Sandbox`].
#[derive(Debug)]
pub struct SandboxBuilder {
    sandbox: Sandbox,
}

impl SandboxBuilder {
    /// Begin building a new sandbox.
    pub fn new() -> Self {
        Self {
            sandbox: Sandbox::new(),
        }
    }

    /// Write `content` to `home/<rel>`, creating parent directories.
    pub fn with_home_file(self, rel: &str, content: &str) -> Self {
        write(&self.sandbox.home().join(rel), content);
        self
    }

    /// Write `content` to `repository/<rel>`, creating parent directories.
    pub fn with_repo_file(self, rel: &str, content: &str) -> Self {
        write(&self.sandbox.repo().join(rel), content);
        self
    }

    /// Finish building and return the sandbox.
    pub fn build(self) -> Sandbox {
        self.sandbox
    }
}

/// A [`Log`] that keeps every message in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<(&'static str, String)>>,
    items: Mutex<Vec<(String, ItemStatus)>>,
}

impl MemoryLog {
    fn push(&self, level: &'static str, msg: &str) {
        self.lines.lock().expect("lock").push((level, msg.to_string()));
    }

    /// Messages logged at `level`, in order.
    pub fn messages(&self, level: &str) -> Vec<String> {
        self.lines
            .lock()
            .expect("lock")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Recorded `(name, status)` pairs, in order.
    pub fn items(&self) -> Vec<(String, ItemStatus)> {
        self.items.lock().expect("lock").clone()
    }
}

impl Log for MemoryLog {
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
    fn record_item(&self, name: &str, status: ItemStatus, _message: Option<&str>) {
        self.items
            .lock()
            .expect("lock")
            .push((name.to_string(), status));
    }
}

/// An [`Executor`] that records invocations and fails for chosen packages.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<(PathBuf, String, Vec<String>)>>,
    failing: Vec<String>,
}

impl RecordingExecutor {
    /// Fail any invocation whose last argument is `arg`.
    pub fn failing_on(mut self, arg: &str) -> Self {
        self.failing.push(arg.to_string());
        self
    }

    /// Every `(dir, program, args)` seen so far.
    pub fn calls(&self) -> Vec<(PathBuf, String, Vec<String>)> {
        self.calls.lock().expect("lock").clone()
    }
}

impl Executor for RecordingExecutor {
    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.calls.lock().expect("lock").push((
            dir.to_path_buf(),
            program.to_string(),
            args.iter().map(ToString::to_string).collect(),
        ));
        let fail = args
            .last()
            .is_some_and(|last| self.failing.iter().any(|f| f == last));
        Ok(ExecResult {
            stdout: String::new(),
            stderr: if fail { "conflict".to_string() } else { String::new() },
            success: !fail,
            code: Some(i32::from(fail)),
        })
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        Some(PathBuf::from("/usr/bin").join(program))
    }
}
