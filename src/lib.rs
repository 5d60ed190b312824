//! stew: a small dotfiles manager.
//!
//! Files are *adopted* from the home directory into a package of the
//! dotfiles repository, keeping their path below home, and then *linked*
//! back with GNU Stow. Version control is left to git.
//!
//! - **[`relocate`]**: plan and perform moves from home into the repository
//! - **[`config`]**: resolve the home directory and repository root
//! - **[`tools`]**: typed wrappers for `stow` and `git`
//! - **[`commands`]**: subcommand orchestration (`adopt`, `link`, `list`, ...)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod paths;
pub mod relocate;
pub mod tools;
