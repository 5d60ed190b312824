//! Command: link packages into home with stow.
use anyhow::Result;

use super::{Context, Outcome};
use crate::cli::LinkOpts;
use crate::logging::ItemStatus;
use crate::relocate::PackageName;
use crate::tools::Stow;

/// Run the link command.
///
/// # Errors
///
/// Returns an error if the repository is missing or any package failed to
/// link. Every package is attempted.
pub fn run(ctx: &Context, opts: &LinkOpts) -> Result<()> {
    ctx.require_repository()?;
    link_packages(ctx, &opts.packages)
}

/// Link each of `packages`, continuing past failures.
///
/// # Errors
///
/// Returns an error if any package failed.
pub fn link_packages<S: AsRef<str>>(ctx: &Context, packages: &[S]) -> Result<()> {
    apply(ctx, packages, false)
}

/// Shared driver for link and unlink.
pub(super) fn apply<S: AsRef<str>>(ctx: &Context, packages: &[S], delete: bool) -> Result<()> {
    let (stage, done, verb) = if delete {
        ("Unlinking packages", "unlinked", "unlink")
    } else {
        ("Linking packages", "linked", "link")
    };
    ctx.log.stage(stage);

    let stow = Stow::new(ctx.executor, ctx.settings);
    let mut outcome = Outcome::default();
    for package in packages {
        let package = package.as_ref();
        let result = apply_one(ctx, &stow, package, delete, done);
        if result.is_err() {
            ctx.log.warn(&format!("cannot {verb} {package}"));
        }
        outcome.record(ctx.log, package, &result);
    }
    outcome.finish("package(s)")
}

fn apply_one(
    ctx: &Context,
    stow: &Stow,
    package: &str,
    delete: bool,
    done: &str,
) -> Result<ItemStatus> {
    let package = PackageName::new(package)?;
    let package = package.as_str();
    if ctx.dry_run {
        ctx.log
            .dry_run(&format!("stow {}", stow.args(package, delete).join(" ")));
        return Ok(ItemStatus::DryRun);
    }
    let dir = ctx.settings.package_dir(package);
    if !dir.is_dir() {
        anyhow::bail!("package not found: {}", dir.display());
    }
    if delete {
        stow.unlink(package)?;
    } else {
        stow.link(package)?;
    }
    ctx.log.info(&format!("{package} {done}"));
    Ok(ItemStatus::Ok)
}
