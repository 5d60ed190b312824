//! Typed wrappers around the external tools stew delegates to.
//!
//! [`stow`] creates and removes the symlink farm; [`git`] handles version
//! control. Both go through an [`Executor`] so tests can record calls instead
//! of spawning processes.
pub mod git;
pub mod stow;

pub use git::Git;
pub use stow::Stow;

use std::path::Path;

use anyhow::Result;

use crate::error::ToolError;
use crate::exec::{ExecResult, Executor};

/// Run `program` and turn a non-zero exit into [`ToolError::Failed`].
///
/// A program that cannot be spawned and is not on `PATH` is reported as
/// [`ToolError::NotFound`]; other spawn failures are passed through.
fn run_checked(
    executor: &dyn Executor,
    dir: &Path,
    program: &str,
    args: &[&str],
    action: &str,
) -> Result<ExecResult> {
    let result = match executor.run_in(dir, program, args) {
        Ok(result) => result,
        Err(e) if executor.which(program).is_none() => {
            return Err(e.context(ToolError::NotFound {
                program: program.to_string(),
            }));
        }
        Err(e) => return Err(e),
    };
    if !result.success {
        return Err(ToolError::Failed {
            program: program.to_string(),
            action: action.to_string(),
            code: result.code.unwrap_or(-1),
            stderr: result.stderr.trim().to_string(),
        }
        .into());
    }
    Ok(result)
}
