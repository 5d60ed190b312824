//! Command: print version information.
use std::io::{self, Write};

use anyhow::Result;

/// Version string baked in at build time.
#[must_use]
pub fn version() -> &'static str {
    option_env!("STEW_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the stew version to stdout.
///
/// # Errors
///
/// Returns an error if stdout is closed.
pub fn run() -> Result<()> {
    writeln!(io::stdout(), "stew {}", version())?;
    Ok(())
}
