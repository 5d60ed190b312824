//! Moving files from home into the repository.
//!
//! A source at `home/<dir>/<name>` is moved to
//! `repository/<package>/<dir>/<name>`, so that linking the package back into
//! home recreates the original path. Planning is pure; only
//! [`Relocator::execute`] touches the filesystem, with one `mkdir -p` and one
//! atomic rename.
mod error;
mod package;
mod plan;

pub use error::{AdoptError, RelocateError};
pub use package::PackageName;
pub use plan::{RelocationPlan, RelocationRequest};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::logging::Log;
use crate::paths;

/// Computes and performs relocations for one home/repository pair.
pub struct Relocator<'a> {
    settings: &'a Settings,
    log: &'a dyn Log,
}

impl std::fmt::Debug for Relocator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relocator")
            .field("settings", &self.settings)
            .field("log", &"<dyn Log>")
            .finish()
    }
}

impl<'a> Relocator<'a> {
    /// Create a relocator for `settings`, reporting through `log`.
    #[must_use]
    pub const fn new(settings: &'a Settings, log: &'a dyn Log) -> Self {
        Self { settings, log }
    }

    /// Compute where `request.source` would go, without touching the
    /// filesystem beyond `lstat`.
    ///
    /// # Errors
    ///
    /// Returns the first failed check: [`RelocateError::Resolve`],
    /// [`NotFound`](RelocateError::NotFound), [`Inspect`](RelocateError::Inspect),
    /// [`OutsideHome`](RelocateError::OutsideHome),
    /// [`InsideRepository`](RelocateError::InsideRepository),
    /// [`ContainsRepository`](RelocateError::ContainsRepository),
    /// [`AlreadyManaged`](RelocateError::AlreadyManaged) or
    /// [`DestinationExists`](RelocateError::DestinationExists).
    pub fn plan(&self, request: &RelocationRequest) -> Result<RelocationPlan, RelocateError> {
        let Settings { home, repository } = self.settings;

        let source = paths::absolute(&request.source).map_err(|e| RelocateError::Resolve {
            path: request.source.clone(),
            source: e,
        })?;

        let meta = match fs::symlink_metadata(&source) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RelocateError::NotFound { path: source });
            }
            Err(e) => return Err(RelocateError::Inspect { path: source, source: e }),
        };

        let relative = match source.strip_prefix(home) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            _ => {
                return Err(RelocateError::OutsideHome {
                    path: source,
                    home: home.clone(),
                });
            }
        };
        if paths::is_within(&source, repository) {
            return Err(RelocateError::InsideRepository { path: source });
        }
        if paths::is_within(repository, &source) {
            return Err(RelocateError::ContainsRepository {
                path: source,
                repository: repository.clone(),
            });
        }
        if meta.is_symlink() {
            let target = link_target(&source)
                .map_err(|e| RelocateError::Inspect { path: source.clone(), source: e })?;
            if paths::is_within(&target, repository) {
                return Err(RelocateError::AlreadyManaged { path: source, target });
            }
        }

        let relative_dir = relative.parent().map(Path::to_path_buf).unwrap_or_default();
        let mut destination_dir = repository.join(&request.package);
        if !relative_dir.as_os_str().is_empty() {
            destination_dir.push(&relative_dir);
        }
        // Non-empty and normalized, so the last component is a file name.
        let file_name = relative.file_name().unwrap_or(relative.as_os_str());
        let destination_file = destination_dir.join(file_name);
        debug_assert!(destination_file.starts_with(repository));

        if fs::symlink_metadata(&destination_file).is_ok() {
            return Err(RelocateError::DestinationExists {
                path: destination_file,
            });
        }

        Ok(RelocationPlan {
            source,
            package: request.package.clone(),
            relative_dir,
            destination_dir,
            destination_file,
        })
    }

    /// Create the destination directory and rename the source into it.
    ///
    /// Directory creation is idempotent. A failed rename leaves the source
    /// where it was; directories already created are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`RelocateError::CreateDirFailed`] or
    /// [`RelocateError::MoveFailed`] with the underlying I/O error.
    pub fn execute(&self, plan: &RelocationPlan) -> Result<(), RelocateError> {
        let dir_name = if plan.relative_dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            plan.relative_dir.as_path()
        };
        self.log.debug(&format!("dir name: {}", dir_name.display()));

        fs::create_dir_all(&plan.destination_dir).map_err(|e| RelocateError::CreateDirFailed {
            path: plan.destination_dir.clone(),
            source: e,
        })?;

        fs::rename(&plan.source, &plan.destination_file).map_err(|e| {
            RelocateError::MoveFailed {
                from: plan.source.clone(),
                to: plan.destination_file.clone(),
                source: e,
            }
        })?;

        self.log.info(&format!(
            "{} -> {}",
            plan.source.display(),
            plan.destination_file.display()
        ));
        Ok(())
    }

    /// Plan and execute a single request.
    ///
    /// # Errors
    ///
    /// Any error from [`plan`](Self::plan) or [`execute`](Self::execute).
    pub fn relocate(&self, request: &RelocationRequest) -> Result<RelocationPlan, RelocateError> {
        let plan = self.plan(request)?;
        self.execute(&plan)?;
        Ok(plan)
    }

    /// Adopt every path in `sources` into one package.
    ///
    /// `name` is required when more than one source is given; a single source
    /// defaults to its own base name. All sources are planned before anything
    /// moves, so validation errors leave the filesystem untouched. Sources
    /// are then moved one at a time in order; the first failure stops the
    /// batch without undoing earlier moves. With `dry_run` only the planning
    /// pass runs.
    ///
    /// Returns the plans that were (or, in a dry run, would be) carried out.
    ///
    /// # Errors
    ///
    /// Returns an [`AdoptError`] carrying the failure and the relocations
    /// that completed before it.
    pub fn adopt(
        &self,
        sources: &[PathBuf],
        name: Option<&str>,
        dry_run: bool,
    ) -> Result<Vec<RelocationPlan>, AdoptError> {
        let requests = requests(sources, name).map_err(AdoptError::before_any_move)?;

        let mut planned: Vec<RelocationPlan> = Vec::with_capacity(requests.len());
        for request in &requests {
            let plan = self.plan(request).map_err(AdoptError::before_any_move)?;
            if planned.iter().any(|p| {
                paths::is_within(&plan.source, &p.source) || paths::is_within(&p.source, &plan.source)
            }) {
                return Err(AdoptError::before_any_move(RelocateError::DuplicateSource {
                    path: plan.source,
                }));
            }
            planned.push(plan);
        }

        if dry_run {
            for plan in &planned {
                self.log.dry_run(&format!(
                    "would move {} -> {}",
                    plan.source.display(),
                    plan.destination_file.display()
                ));
            }
            return Ok(planned);
        }

        let mut completed = Vec::with_capacity(requests.len());
        for request in &requests {
            match self.relocate(request) {
                Ok(plan) => completed.push(plan),
                Err(source) => return Err(AdoptError { completed, source }),
            }
        }
        Ok(completed)
    }
}

/// Pair every source with the package it goes into.
fn requests(sources: &[PathBuf], name: Option<&str>) -> Result<Vec<RelocationRequest>, RelocateError> {
    let package = match (name, sources) {
        (Some(name), _) => PackageName::new(name)?,
        (None, []) => return Ok(Vec::new()),
        (None, [source]) => {
            let abs = paths::absolute(source).map_err(|e| RelocateError::Resolve {
                path: source.clone(),
                source: e,
            })?;
            PackageName::from_source(&abs)?
        }
        (None, _) => {
            return Err(RelocateError::AmbiguousPackageName {
                count: sources.len(),
            });
        }
    };
    Ok(sources
        .iter()
        .map(|source| RelocationRequest::new(source.clone(), package.clone()))
        .collect())
}

/// Resolve where the symlink at `link` points, lexically.
fn link_target(link: &Path) -> io::Result<PathBuf> {
    let target = fs::read_link(link)?;
    let joined = match link.parent() {
        Some(parent) if target.is_relative() => parent.join(target),
        _ => target,
    };
    Ok(paths::normalize(&joined))
}
