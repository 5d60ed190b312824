//! Command: check that stew can do its job.
use anyhow::Result;

use super::{Context, Outcome};
use crate::error::ToolError;
use crate::logging::ItemStatus;
use crate::tools::{git, stow};

/// Run every check, logging each as ok or warn.
///
/// # Errors
///
/// Returns an error if any check failed.
pub fn run(ctx: &Context) -> Result<()> {
    ctx.log.stage("Checking configuration");
    let mut outcome = Outcome::default();

    let home = &ctx.settings.home;
    check(
        ctx,
        &mut outcome,
        "home directory",
        if home.is_dir() {
            Ok(format!("home directory is {}", home.display()))
        } else {
            Err(anyhow::anyhow!(
                "home directory {} does not exist",
                home.display()
            ))
        },
    );

    let repository = &ctx.settings.repository;
    check(
        ctx,
        &mut outcome,
        "repository",
        if repository.is_dir() {
            Ok(format!("repository is {}", repository.display()))
        } else {
            Err(anyhow::anyhow!(
                "cannot find repository at {}",
                repository.display()
            ))
        },
    );

    ctx.log.stage("Checking dependencies");
    for program in [git::PROGRAM, stow::PROGRAM] {
        let found = ctx.executor.which(program).map_or_else(
            || {
                Err(ToolError::NotFound {
                    program: program.to_string(),
                }
                .into())
            },
            |path| Ok(format!("{program} command found at {}", path.display())),
        );
        check(ctx, &mut outcome, program, found);
    }

    outcome.finish("check(s)")
}

fn check(ctx: &Context, outcome: &mut Outcome, name: &str, result: Result<String>) {
    let status = match result {
        Ok(msg) => {
            ctx.log.ok(&msg);
            Ok(ItemStatus::Ok)
        }
        Err(e) => {
            ctx.log.warn(&format!("{e:#}"));
            Err(e)
        }
    };
    outcome.record(ctx.log, name, &status);
}
