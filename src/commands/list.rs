//! Command: list packages and the files they contain.
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;

use super::Context;
use crate::cli::ListOpts;

/// One package and its files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageListing {
    /// Directory name under the repository.
    pub name: String,
    /// Files below the package directory, relative to it, sorted.
    pub files: Vec<String>,
}

/// Run the list command, writing to stdout.
///
/// # Errors
///
/// Returns an error if the repository cannot be read or stdout is closed.
pub fn run(ctx: &Context, opts: &ListOpts) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_to(ctx, opts, &mut out)
}

/// Run the list command, writing to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn run_to(ctx: &Context, opts: &ListOpts, out: &mut impl Write) -> Result<()> {
    ctx.require_repository()?;
    let listings = packages(&ctx.settings.repository, &opts.packages)?;

    for wanted in &opts.packages {
        if !listings.iter().any(|l| &l.name == wanted) {
            ctx.log.warn(&format!("no package named {wanted}"));
        }
    }

    if opts.json {
        render_json(&listings, out)?;
    } else {
        render_text(&listings, out)?;
    }
    Ok(())
}

/// Collect the packages in `repository`, sorted by name.
///
/// Hidden top-level directories (such as `.git`) and plain files are not
/// packages. When `filter` is non-empty only packages named in it are
/// returned. Symlinks inside a package are listed but not followed.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn packages(repository: &Path, filter: &[String]) -> Result<Vec<PackageListing>> {
    let entries = fs::read_dir(repository)
        .with_context(|| format!("reading repository {}", repository.display()))?;

    let mut listings = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || !entry.file_type()?.is_dir() {
            continue;
        }
        if !filter.is_empty() && !filter.contains(&name) {
            continue;
        }
        let root = entry.path();
        let mut files = Vec::new();
        collect_files(&root, &root, &mut files)?;
        files.sort();
        listings.push(PackageListing { name, files });
    }
    listings.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(listings)
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<String>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_files(root, &path, files)?;
        } else if let Ok(rel) = path.strip_prefix(root) {
            files.push(rel.display().to_string());
        }
    }
    Ok(())
}

/// Write `name:` followed by each file indented by two spaces.
///
/// # Errors
///
/// Returns any write error.
pub fn render_text(listings: &[PackageListing], out: &mut impl Write) -> io::Result<()> {
    for listing in listings {
        writeln!(out, "{}:", listing.name)?;
        for file in &listing.files {
            writeln!(out, "  {file}")?;
        }
    }
    Ok(())
}

/// Write a JSON object mapping package names to their files.
///
/// # Errors
///
/// Returns any serialization or write error.
pub fn render_json(listings: &[PackageListing], out: &mut impl Write) -> Result<()> {
    let map: BTreeMap<&str, &[String]> = listings
        .iter()
        .map(|l| (l.name.as_str(), l.files.as_slice()))
        .collect();
    serde_json::to_writer_pretty(&mut *out, &map)?;
    writeln!(out)?;
    Ok(())
}
