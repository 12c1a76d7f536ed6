//! Global context for goven operations.
//!
//! Bundles the working directory, the workspace roots and the merged
//! configuration so that operations don't read the process environment
//! themselves.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::WorkspaceRoots;
use crate::util::config::{self, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory, symlinks resolved
    cwd: PathBuf,

    /// Workspace roots from GOPATH
    roots: WorkspaceRoots,

    /// Merged global and project configuration
    config: Config,
}

impl GlobalContext {
    /// Create a context from the process environment.
    ///
    /// `gopath` overrides the `GOPATH` environment variable when given.
    pub fn new(gopath: Option<&OsStr>) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let cwd = cwd
            .canonicalize()
            .with_context(|| format!("failed to resolve {}", cwd.display()))?;

        let roots = match gopath {
            Some(value) => WorkspaceRoots::parse(value),
            None => WorkspaceRoots::from_env(),
        };

        let global = config::global_config_path();
        let config = config::load_config(global.as_deref(), &config::project_config_path(&cwd));

        Ok(GlobalContext { cwd, roots, config })
    }

    /// Create a context for an explicit directory and roots, with default
    /// configuration.
    pub fn with_cwd(cwd: PathBuf, roots: WorkspaceRoots) -> Self {
        GlobalContext {
            cwd,
            roots,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn roots(&self) -> &WorkspaceRoots {
        &self.roots
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The project-local goven directory.
    pub fn project_goven_dir(&self) -> PathBuf {
        self.cwd.join(".goven")
    }
}
