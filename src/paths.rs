//! Lexical path helpers shared by configuration and relocation.
//!
//! Nothing here follows symlinks: a dotfile that is itself a symlink must be
//! judged by where it *lives*, not by where it points. The one place that
//! touches the disk is [`logical_dir`], and only to compare directories.
use std::io;
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against [`current_dir`] and normalize it.
///
/// # Errors
///
/// Returns an error if `path` is empty or the current directory cannot be
/// determined.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty path"));
    }
    let abs = if path.has_root() {
        std::path::absolute(path)?
    } else {
        current_dir()?.join(path)
    };
    Ok(normalize(dunce::simplified(&abs)))
}

/// The working directory as the shell spells it.
///
/// `std::env::current_dir` reports the physical directory, so under a
/// symlinked home (`/home/u -> /data/u`) it says `/data/u` while `$HOME`
/// says `/home/u`. `$PWD` keeps the symlinked spelling and is used whenever
/// it still names the same directory.
///
/// # Errors
///
/// Returns an error if the physical current directory cannot be determined.
pub fn current_dir() -> io::Result<PathBuf> {
    let physical = std::env::current_dir()?;
    let pwd = std::env::var_os("PWD").map(PathBuf::from);
    Ok(logical_dir(pwd.as_deref(), &physical))
}

/// `pwd` if it is an absolute, `.`/`..`-free path to the same directory as
/// `physical`, else `physical`.
#[must_use]
pub fn logical_dir(pwd: Option<&Path>, physical: &Path) -> PathBuf {
    let Some(pwd) = pwd else {
        return physical.to_path_buf();
    };
    let clean = pwd.is_absolute()
        && pwd
            .components()
            .all(|c| !matches!(c, Component::CurDir | Component::ParentDir));
    let same = || match (dunce::canonicalize(pwd), dunce::canonicalize(physical)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if clean && same() {
        pwd.to_path_buf()
    } else {
        physical.to_path_buf()
    }
}

/// Remove `.` components and resolve `..` components lexically.
///
/// `..` at the root stays at the root, matching how the OS resolves `/..`.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Return `true` if `path` is `base` or lies underneath it.
#[must_use]
pub fn is_within(path: &Path, base: &Path) -> bool {
    path.starts_with(base)
}
