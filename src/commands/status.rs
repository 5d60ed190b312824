//! Command: show `git status` for the repository.
use std::io::{self, Write};

use anyhow::Result;

use super::Context;
use crate::tools::Git;

/// Run the status command, printing git's output.
///
/// # Errors
///
/// Returns an error if the repository is missing or git fails.
pub fn run(ctx: &Context) -> Result<()> {
    run_to(ctx, &mut io::stdout().lock())
}

/// Run the status command, writing git's output to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn run_to(ctx: &Context, out: &mut impl Write) -> Result<()> {
    ctx.require_repository()?;
    let output = Git::new(ctx.executor, ctx.settings).status()?;
    out.write_all(output.as_bytes())?;
    Ok(())
}
