//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the dotfiles manager.
#[derive(Parser, Debug)]
#[command(name = "stew", about = "A simple dotfiles manager", version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override the home directory
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Override the dotfiles repository (default: $HOME/$STEW_REPOSITORY or $HOME/.dotfiles)
    #[arg(long, global = true, value_name = "DIR")]
    pub repository: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Adopt unmanaged dotfiles
    #[command(visible_alias = "ad")]
    Adopt(AdoptOpts),
    /// Link managed dotfiles
    #[command(visible_alias = "ln")]
    Link(LinkOpts),
    /// Unlink managed dotfiles
    Unlink(LinkOpts),
    /// List managed dotfiles
    #[command(visible_alias = "ls")]
    List(ListOpts),
    /// Get status of the git repository
    Status,
    /// Sync dotfiles with the remote repository
    Sync,
    /// Check stew configuration and dependencies
    Doctor,
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file of this invocation.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Adopt(_) => "adopt",
            Self::Link(_) => "link",
            Self::Unlink(_) => "unlink",
            Self::List(_) => "list",
            Self::Status => "status",
            Self::Sync => "sync",
            Self::Doctor => "doctor",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `adopt` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct AdoptOpts {
    /// Package name (defaults to the base name of a single path)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Link the package after adopting
    #[arg(short, long)]
    pub link: bool,

    /// Files or directories to adopt
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Options for the `link` and `unlink` subcommands.
#[derive(Parser, Debug, Clone)]
pub struct LinkOpts {
    /// Packages to process
    #[arg(required = true, value_name = "PACKAGE")]
    pub packages: Vec<String>,
}

/// Options for the `list` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct ListOpts {
    /// Only list these packages
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_adopt_single_path() {
        let cli = Cli::parse_from(["stew", "adopt", ".zshrc"]);
        let Command::Adopt(opts) = cli.command else {
            panic!("expected adopt");
        };
        assert_eq!(opts.paths, vec![PathBuf::from(".zshrc")]);
        assert_eq!(opts.name, None);
        assert!(!opts.link);
    }

    #[test]
    fn parse_adopt_alias_with_name() {
        let cli = Cli::parse_from(["stew", "ad", "-n", "bash", ".bashrc", ".bash_profile"]);
        let Command::Adopt(opts) = cli.command else {
            panic!("expected adopt");
        };
        assert_eq!(opts.name.as_deref(), Some("bash"));
        assert_eq!(opts.paths.len(), 2);
    }

    #[test]
    fn parse_adopt_requires_path() {
        assert!(Cli::try_parse_from(["stew", "adopt"]).is_err());
    }

    #[test]
    fn parse_adopt_link() {
        let cli = Cli::parse_from(["stew", "adopt", "--link", ".vimrc"]);
        assert!(matches!(cli.command, Command::Adopt(AdoptOpts { link: true, .. })));
    }

    #[test]
    fn parse_link_alias() {
        let cli = Cli::parse_from(["stew", "ln", "zsh", "nvim"]);
        let Command::Link(opts) = cli.command else {
            panic!("expected link");
        };
        assert_eq!(opts.packages, ["zsh", "nvim"]);
    }

    #[test]
    fn parse_link_requires_package() {
        assert!(Cli::try_parse_from(["stew", "link"]).is_err());
    }

    #[test]
    fn parse_unlink() {
        let cli = Cli::parse_from(["stew", "unlink", "zsh"]);
        assert!(matches!(cli.command, Command::Unlink(_)));
    }

    #[test]
    fn parse_list_alias_and_json() {
        let cli = Cli::parse_from(["stew", "ls", "--json", "zsh"]);
        let Command::List(opts) = cli.command else {
            panic!("expected list");
        };
        assert!(opts.json);
        assert_eq!(opts.packages, ["zsh"]);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "stew",
            "sync",
            "-d",
            "--home",
            "/tmp/h",
            "--repository",
            "/tmp/r",
            "-v",
        ]);
        assert!(matches!(cli.command, Command::Sync));
        assert!(cli.global.dry_run);
        assert!(cli.verbose);
        assert_eq!(cli.global.home, Some(PathBuf::from("/tmp/h")));
        assert_eq!(cli.global.repository, Some(PathBuf::from("/tmp/r")));
    }

    #[test]
    fn parse_completions_shell() {
        let cli = Cli::parse_from(["stew", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Command::Completions(CompletionsOpts {
                shell: clap_complete::Shell::Zsh
            })
        ));
    }

    #[test]
    fn command_names_match_subcommands() {
        for (args, name) in [
            (&["stew", "status"][..], "status"),
            (&["stew", "doctor"][..], "doctor"),
            (&["stew", "version"][..], "version"),
            (&["stew", "ls"][..], "list"),
        ] {
            assert_eq!(Cli::parse_from(args).command.name(), name);
        }
    }
}
