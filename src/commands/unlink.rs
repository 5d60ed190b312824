//! Command: remove a package's symlinks from home.
use anyhow::Result;

use super::Context;
use crate::cli::LinkOpts;

/// Run the unlink command (`stow -D`).
///
/// # Errors
///
/// Returns an error if the repository is missing or any package failed to
/// unlink. Every package is attempted.
pub fn run(ctx: &Context, opts: &LinkOpts) -> Result<()> {
    ctx.require_repository()?;
    super::link::apply(ctx, &opts.packages, true)
}
