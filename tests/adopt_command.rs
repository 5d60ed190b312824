#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing
)]
//! Integration tests for adopting files into the repository.
//!
//! These drive [`Relocator`] and the `adopt` command against a real
//! temporary home directory.

mod common;

use std::fs;
use std::path::PathBuf;

use common::{MemoryLog, RecordingExecutor, SandboxBuilder};
use stew_cli::cli::AdoptOpts;
use stew_cli::commands::{self, Context};
use stew_cli::relocate::{AdoptError, PackageName, RelocateError, RelocationRequest, Relocator};

// ---------------------------------------------------------------------------
// Path remapping
// ---------------------------------------------------------------------------

/// A direct child of home lands at the top of its package.
#[test]
fn direct_child_of_home() {
    let sb = SandboxBuilder::new()
        .with_home_file(".zshrc", "bindkey -v\n")
        .build();
    let log = MemoryLog::default();
    let request = RelocationRequest::new(
        sb.home().join(".zshrc"),
        PackageName::new("zsh").unwrap(),
    );

    let dest = Relocator::new(&sb.settings, &log)
        .relocate(&request)
        .unwrap()
        .destination_file;

    assert_eq!(dest, sb.repo().join("zsh/.zshrc"));
    assert_eq!(sb.read_repo("zsh/.zshrc"), "bindkey -v\n");
    assert!(!sb.home().join(".zshrc").exists());
}

/// The directory structure below home is recreated inside the package.
#[test]
fn nested_file_keeps_its_directories() {
    let sb = SandboxBuilder::new()
        .with_home_file(".config/nvim/init.lua", "-- init\n")
        .build();
    let log = MemoryLog::default();

    let plans = Relocator::new(&sb.settings, &log)
        .adopt(&[sb.home().join(".config/nvim/init.lua")], Some("nvim"), false)
        .unwrap();

    assert_eq!(
        plans[0].destination_file,
        sb.repo().join("nvim/.config/nvim/init.lua")
    );
    assert_eq!(sb.read_repo("nvim/.config/nvim/init.lua"), "-- init\n");
}

/// For any source below home, the path below the package equals the path
/// below home.
#[test]
fn destination_mirrors_home_relative_path() {
    let rels = [".a", ".config/b", ".config/c/d", ".local/share/e/f/g"];
    let mut builder = SandboxBuilder::new();
    for rel in rels {
        builder = builder.with_home_file(rel, rel);
    }
    let sb = builder.build();
    let log = MemoryLog::default();
    let sources: Vec<PathBuf> = rels.iter().map(|r| sb.home().join(r)).collect();

    let plans = Relocator::new(&sb.settings, &log)
        .adopt(&sources, Some("mix"), false)
        .unwrap();

    for (rel, plan) in rels.iter().zip(&plans) {
        let below_package = plan
            .destination_file
            .strip_prefix(sb.repo().join("mix"))
            .unwrap();
        assert_eq!(below_package, std::path::Path::new(rel));
        assert_eq!(sb.read_repo(&format!("mix/{rel}")), *rel);
    }
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// A path outside home is rejected and nothing changes.
#[test]
fn outside_home_is_rejected() {
    let sb = SandboxBuilder::new().build();
    let outside = sb.root.path().join("elsewhere.conf");
    fs::write(&outside, "x").unwrap();
    let log = MemoryLog::default();

    let err = Relocator::new(&sb.settings, &log)
        .adopt(&[outside.clone()], Some("x"), false)
        .unwrap_err();

    assert!(matches!(err.source, RelocateError::OutsideHome { .. }));
    assert!(outside.exists());
    assert_eq!(fs::read_dir(sb.repo()).unwrap().count(), 0);
}

/// Several files without a package name are rejected before any mutation.
#[test]
fn multiple_files_need_a_name() {
    let sb = SandboxBuilder::new()
        .with_home_file(".bashrc", "a")
        .with_home_file(".profile", "b")
        .build();
    let log = MemoryLog::default();

    let err = Relocator::new(&sb.settings, &log)
        .adopt(
            &[sb.home().join(".bashrc"), sb.home().join(".profile")],
            None,
            false,
        )
        .unwrap_err();

    assert!(matches!(
        err.source,
        RelocateError::AmbiguousPackageName { count: 2 }
    ));
    assert_eq!(sb.read_home(".bashrc"), "a");
    assert_eq!(sb.read_home(".profile"), "b");
    assert_eq!(fs::read_dir(sb.repo()).unwrap().count(), 0);
}

/// An existing file in the package is never overwritten.
#[test]
fn existing_destination_is_kept() {
    let sb = SandboxBuilder::new()
        .with_home_file(".vimrc", "new")
        .with_repo_file("vim/.vimrc", "old")
        .build();
    let log = MemoryLog::default();

    let err = Relocator::new(&sb.settings, &log)
        .adopt(&[sb.home().join(".vimrc")], Some("vim"), false)
        .unwrap_err();

    assert!(matches!(err.source, RelocateError::DestinationExists { .. }));
    assert_eq!(sb.read_home(".vimrc"), "new");
    assert_eq!(sb.read_repo("vim/.vimrc"), "old");
}

// ---------------------------------------------------------------------------
// Batches through the command
// ---------------------------------------------------------------------------

/// A failure mid-batch reports exactly the files already moved, which stay
/// in the repository.
#[test]
fn partial_batch_is_reported() {
    let sb = SandboxBuilder::new()
        .with_home_file(".config/one/a", "1")
        .with_home_file(".config/two/b", "2")
        .with_repo_file("pkg/.config/two", "blocks the directory")
        .build();
    let log = MemoryLog::default();
    let exec = RecordingExecutor::default();
    let ctx = Context::new(&sb.settings, &log, &exec, false);
    let opts = AdoptOpts {
        name: Some("pkg".into()),
        link: false,
        paths: vec![
            sb.home().join(".config/one/a"),
            sb.home().join(".config/two/b"),
        ],
    };

    let err = commands::adopt::run(&ctx, &opts).unwrap_err();

    let adopt = err.downcast_ref::<AdoptError>().expect("AdoptError");
    assert_eq!(adopt.completed.len(), 1);
    assert_eq!(adopt.completed[0].source, sb.home().join(".config/one/a"));
    assert_eq!(sb.read_repo("pkg/.config/one/a"), "1");
    assert_eq!(sb.read_home(".config/two/b"), "2");
}

/// `adopt --link` stows the new package with the repository and home.
#[test]
fn adopt_then_link() {
    let sb = SandboxBuilder::new()
        .with_home_file(".tmux.conf", "set -g mouse on\n")
        .build();
    let log = MemoryLog::default();
    let exec = RecordingExecutor::default();
    let ctx = Context::new(&sb.settings, &log, &exec, false);
    let opts = AdoptOpts {
        name: Some("tmux".into()),
        link: true,
        paths: vec![sb.home().join(".tmux.conf")],
    };

    commands::adopt::run(&ctx, &opts).unwrap();

    let calls = exec.calls();
    assert_eq!(calls.len(), 1);
    let (dir, program, args) = &calls[0];
    assert_eq!(dir, sb.repo());
    assert_eq!(program, "stow");
    assert_eq!(
        args,
        &[
            "-d".to_string(),
            sb.repo().display().to_string(),
            "-t".to_string(),
            sb.home().display().to_string(),
            "tmux".to_string(),
        ]
    );
}

/// A dry run reports the planned moves and leaves the disk alone.
#[test]
fn dry_run_changes_nothing() {
    let sb = SandboxBuilder::new()
        .with_home_file(".gitconfig", "[user]\n")
        .build();
    let log = MemoryLog::default();
    let exec = RecordingExecutor::default();
    let ctx = Context::new(&sb.settings, &log, &exec, true);
    let opts = AdoptOpts {
        name: None,
        link: true,
        paths: vec![sb.home().join(".gitconfig")],
    };

    commands::adopt::run(&ctx, &opts).unwrap();

    assert_eq!(sb.read_home(".gitconfig"), "[user]\n");
    assert_eq!(fs::read_dir(sb.repo()).unwrap().count(), 0);
    assert!(exec.calls().is_empty());
    assert!(log.messages("dry_run")[0].starts_with("would move "));
}
