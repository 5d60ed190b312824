//! Command: move unmanaged dotfiles into a package.
use anyhow::Result;

use super::Context;
use crate::cli::AdoptOpts;
use crate::relocate::Relocator;

/// Run the adopt command.
///
/// Moves every path into one package (see [`Relocator::adopt`]) and, with
/// `--link`, links the package back into home afterwards.
///
/// # Errors
///
/// Returns an error if any path cannot be adopted or linking fails. Files
/// moved before a failure stay in the repository and are listed as warnings.
pub fn run(ctx: &Context, opts: &AdoptOpts) -> Result<()> {
    ctx.log.stage("Adopting files");
    let relocator = Relocator::new(ctx.settings, ctx.log);

    let plans = match relocator.adopt(&opts.paths, opts.name.as_deref(), ctx.dry_run) {
        Ok(plans) => plans,
        Err(e) => {
            for plan in &e.completed {
                ctx.log.warn(&format!(
                    "already moved {} -> {}",
                    plan.source.display(),
                    plan.destination_file.display()
                ));
            }
            return Err(e.into());
        }
    };

    let Some(package) = plans.first().map(|p| p.package.clone()) else {
        return Ok(());
    };
    if !ctx.dry_run {
        ctx.log
            .ok(&format!("adopted {} path(s) into {package}", plans.len()));
    }

    if opts.link {
        super::link::link_packages(ctx, &[package.as_str()])?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::exec::test_helpers::MockExecutor;
    use crate::logging::RecordingLog;
    use crate::relocate::AdoptError;
    use std::fs;
    use std::path::PathBuf;

    struct Home {
        _tmp: tempfile::TempDir,
        settings: Settings,
    }

    impl Home {
        fn new() -> Self {
            let tmp = tempfile::tempdir().unwrap();
            let settings = Settings::new(tmp.path(), tmp.path().join(".dotfiles"));
            Self { _tmp: tmp, settings }
        }

        fn file(&self, rel: &str) -> PathBuf {
            let path = self.settings.home.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, rel).unwrap();
            path
        }
    }

    fn opts(paths: Vec<PathBuf>, name: Option<&str>, link: bool) -> AdoptOpts {
        AdoptOpts {
            name: name.map(String::from),
            link,
            paths,
        }
    }

    #[test]
    fn adopts_and_reports() {
        let home = Home::new();
        let source = home.file(".zshrc");
        let log = RecordingLog::default();
        let exec = MockExecutor::new();
        let ctx = Context::new(&home.settings, &log, &exec, false);

        run(&ctx, &opts(vec![source.clone()], None, false)).unwrap();

        assert!(!source.exists());
        assert!(home.settings.repository.join(".zshrc/.zshrc").is_file());
        assert_eq!(log.messages("ok"), ["adopted 1 path(s) into .zshrc"]);
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn link_flag_stows_the_package() {
        let home = Home::new();
        let source = home.file(".config/nvim/init.lua");
        let log = RecordingLog::default();
        let exec = MockExecutor::new();
        let ctx = Context::new(&home.settings, &log, &exec, false);

        run(&ctx, &opts(vec![source], Some("nvim"), true)).unwrap();

        let calls = exec.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "stow");
        assert_eq!(calls[0].args.last().map(String::as_str), Some("nvim"));
    }

    #[test]
    fn partial_failure_lists_moved_files() {
        let home = Home::new();
        let a = home.file(".config/x/a");
        let b = home.file(".config/y/b");
        // A file where the second destination directory should go.
        let blocker = home.settings.package_dir("pkg").join(".config/y");
        fs::create_dir_all(blocker.parent().unwrap()).unwrap();
        fs::write(&blocker, "").unwrap();
        let log = RecordingLog::default();
        let exec = MockExecutor::new();
        let ctx = Context::new(&home.settings, &log, &exec, false);

        let err = run(&ctx, &opts(vec![a.clone(), b.clone()], Some("pkg"), true)).unwrap_err();

        let adopt = err.downcast_ref::<AdoptError>().expect("AdoptError");
        assert_eq!(adopt.completed.len(), 1);
        assert!(!a.exists());
        assert!(b.exists());
        let warnings = log.messages("warn");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("already moved "), "{warnings:?}");
        assert!(exec.calls().is_empty(), "link must not run after a failure");
    }

    #[test]
    fn dry_run_moves_nothing_and_does_not_link() {
        let home = Home::new();
        let source = home.file(".gitconfig");
        let log = RecordingLog::default();
        let exec = MockExecutor::new();
        let ctx = Context::new(&home.settings, &log, &exec, true);

        run(&ctx, &opts(vec![source.clone()], Some("git"), true)).unwrap();

        assert!(source.exists());
        assert!(!home.settings.repository.exists());
        assert!(exec.calls().is_empty());
        assert_eq!(log.messages("dry_run").len(), 2);
    }
}
