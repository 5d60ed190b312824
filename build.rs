//! Build script: embeds the version reported by `stew version`.

use std::process::Command;

const VERSION_VAR: &str = "STEW_VERSION";

/// `git describe` of the checkout being built, e.g. `v0.4.1-3-gdeadbee-dirty`.
fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    let described = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (output.status.success() && !described.is_empty()).then_some(described)
}

fn main() {
    // Packagers pin the version through the environment. Without either
    // source, `stew version` reports the Cargo.toml version.
    let version = std::env::var(VERSION_VAR).ok().or_else(describe);
    if let Some(version) = version {
        println!("cargo:rustc-env={VERSION_VAR}={version}");
    }

    println!("cargo:rerun-if-env-changed={VERSION_VAR}");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");
}
