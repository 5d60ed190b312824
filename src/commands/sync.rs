//! Command: pull then push the repository.
use anyhow::Result;

use super::Context;
use crate::tools::Git;

/// Run the sync command.
///
/// # Errors
///
/// Returns an error if the repository is missing or either git step fails;
/// a failed pull skips the push.
pub fn run(ctx: &Context) -> Result<()> {
    ctx.require_repository()?;
    ctx.log.stage("Syncing repository");

    if ctx.dry_run {
        ctx.log.dry_run("git pull");
        ctx.log.dry_run("git push");
        return Ok(());
    }

    let git = Git::new(ctx.executor, ctx.settings);
    let pulled = git.pull()?;
    ctx.log.debug(&format!("git pull output: {}", pulled.trim()));
    git.push()?;
    ctx.log.ok(&format!(
        "{} synced",
        ctx.settings.repository.display()
    ));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::exec::test_helpers::MockExecutor;
    use crate::logging::RecordingLog;

    fn settings(tmp: &tempfile::TempDir) -> Settings {
        Settings::new(tmp.path(), tmp.path())
    }

    #[test]
    fn pulls_then_pushes() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = settings(&tmp);
        let log = RecordingLog::default();
        let exec = MockExecutor::new();
        let ctx = Context::new(&settings, &log, &exec, false);

        run(&ctx).unwrap();

        let args: Vec<_> = exec.calls().into_iter().map(|c| c.args).collect();
        assert_eq!(args, [["pull"], ["push"]]);
        assert_eq!(log.messages("ok").len(), 1);
    }

    #[test]
    fn failed_pull_skips_push() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = settings(&tmp);
        let log = RecordingLog::default();
        let exec = MockExecutor::with_responses(vec![(false, "CONFLICT")]);
        let ctx = Context::new(&settings, &log, &exec, false);

        let err = run(&ctx).unwrap_err();

        assert!(err.to_string().starts_with("git pull failed"), "{err}");
        assert_eq!(exec.calls().len(), 1);
    }

    #[test]
    fn dry_run_runs_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = settings(&tmp);
        let log = RecordingLog::default();
        let exec = MockExecutor::new();
        let ctx = Context::new(&settings, &log, &exec, true);

        run(&ctx).unwrap();

        assert!(exec.calls().is_empty());
        assert_eq!(log.messages("dry_run"), ["git pull", "git push"]);
    }
}
