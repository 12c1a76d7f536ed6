//! Workspace - the GOPATH roots that hold package sources.
//!
//! Every root organises packages at `<root>/src/<import path>`. Roots are
//! searched in declaration order and the first match wins.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::errors::GovenError;
use crate::core::PackageId;

/// Name of the environment variable listing workspace roots.
pub const GOPATH_ENV: &str = "GOPATH";

/// Ordered list of workspace roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceRoots {
    roots: Vec<PathBuf>,
    /// The raw value the roots were parsed from, kept for diagnostics.
    raw: String,
}

impl WorkspaceRoots {
    /// Create from an explicit list of roots.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        let raw = std::env::join_paths(&roots)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        WorkspaceRoots { roots, raw }
    }

    /// Parse a delimiter-separated list such as the value of `GOPATH`.
    /// Empty entries are ignored.
    pub fn parse(value: &OsStr) -> Self {
        let roots = std::env::split_paths(value)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        WorkspaceRoots {
            roots,
            raw: value.to_string_lossy().into_owned(),
        }
    }

    /// Read roots from the `GOPATH` environment variable.
    pub fn from_env() -> Self {
        match std::env::var_os(GOPATH_ENV) {
            Some(value) => WorkspaceRoots::parse(&value),
            None => WorkspaceRoots::default(),
        }
    }

    /// The configured roots in search order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Check whether no root is configured.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    fn ensure_configured(&self) -> Result<(), GovenError> {
        if self.is_empty() {
            return Err(GovenError::Configuration {
                message: format!("missing {}", GOPATH_ENV),
            });
        }
        Ok(())
    }

    /// The `src` directories of every root, in search order.
    pub fn src_dirs(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.roots.iter().map(|root| root.join("src"))
    }

    /// Compute the package identifier that `cwd` represents.
    ///
    /// `cwd` is expected to be already resolved; each root's `src`
    /// directory is tried verbatim first and then with symlinks resolved.
    pub fn resolve_current_package(&self, cwd: &Path) -> Result<PackageId, GovenError> {
        self.ensure_configured()?;

        for top in self.src_dirs() {
            if let Some(id) = relative_package(cwd, &top)? {
                tracing::debug!("Found {} {}", GOPATH_ENV, top.display());
                return Ok(id);
            }
            if let Ok(resolved) = top.canonicalize() {
                if let Some(id) = relative_package(cwd, &resolved)? {
                    tracing::debug!("Found {} {}", GOPATH_ENV, resolved.display());
                    return Ok(id);
                }
            }
        }

        Err(GovenError::Resolution {
            message: format!(
                "{} not found in {}\n{}={}",
                cwd.display(),
                GOPATH_ENV,
                GOPATH_ENV,
                self.raw
            ),
        })
    }

    /// Find the directory holding `package` in the first root that has it.
    ///
    /// Probe failures other than "not found" are logged and the search
    /// moves on to the next root.
    pub fn locate_package(&self, package: &PackageId) -> Option<PathBuf> {
        let relative = package.to_relative_path();
        for src in self.src_dirs() {
            let dir = src.join(&relative);
            match std::fs::metadata(&dir) {
                Ok(meta) if meta.is_dir() => return Some(dir),
                Ok(_) => {
                    tracing::warn!("{} exists but is not a directory", dir.display());
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!("failed to probe {}: {}", dir.display(), e);
                }
            }
        }
        None
    }

    /// Like [`locate_package`](Self::locate_package), but a missing package
    /// is an error listing every probed location.
    pub fn require_package(&self, package: &PackageId) -> Result<PathBuf, GovenError> {
        self.ensure_configured()?;
        self.locate_package(package).ok_or_else(|| GovenError::NotFound {
            package: package.to_string(),
            searched: self
                .src_dirs()
                .map(|src| src.join(package.to_relative_path()))
                .collect(),
        })
    }
}

/// Strip `top` from `dir`, returning the remainder as a package identifier.
/// `dir` equal to `top` names no package.
fn relative_package(dir: &Path, top: &Path) -> Result<Option<PackageId>, GovenError> {
    match dir.strip_prefix(top) {
        Ok(rest) if rest.as_os_str().is_empty() => Ok(None),
        Ok(rest) => PackageId::from_relative_path(rest).map(Some),
        Err(_) => Ok(None),
    }
}
