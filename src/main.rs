//! `stew` binary entry point.
use anyhow::Result;
use clap::Parser;

use stew_cli::cli::{Cli, Command};
use stew_cli::commands::{self, Context};
use stew_cli::config::Settings;
use stew_cli::exec::SystemExecutor;
use stew_cli::logging::{self, Log as _, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    // Commands that need neither settings nor a log file.
    match &args.command {
        Command::Completions(opts) => {
            commands::completions::run(opts.shell);
            return Ok(());
        }
        Command::Version => return commands::version::run(),
        _ => {}
    }

    let log_file = logging::init_subscriber(args.verbose, args.command.name());
    let log = Logger::new(log_file);
    let settings = Settings::resolve(
        args.global.home.as_deref(),
        args.global.repository.as_deref(),
    )?;
    log.debug(&format!("home: {}", settings.home.display()));
    log.debug(&format!("repository: {}", settings.repository.display()));

    let executor = SystemExecutor;
    let ctx = Context::new(&settings, &log, &executor, args.global.dry_run);

    let result = match &args.command {
        Command::Adopt(opts) => commands::adopt::run(&ctx, opts),
        Command::Link(opts) => commands::link::run(&ctx, opts),
        Command::Unlink(opts) => commands::unlink::run(&ctx, opts),
        Command::List(opts) => commands::list::run(&ctx, opts),
        Command::Status => commands::status::run(&ctx),
        Command::Sync => commands::sync::run(&ctx),
        Command::Doctor => commands::doctor::run(&ctx),
        Command::Completions(_) | Command::Version => Ok(()),
    };

    log.print_summary();
    result
}
