//! Implementation of `goven vendor`.
//!
//! Vendoring runs in phases: resolve the package's origin and the current
//! tree's own import path, copy the package into the tree, rewrite every
//! import of it below the current directory, then run the formatter.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{GovenError, PackageId, RewriteMapping};
use crate::ops::goven_format::format_tree;
use crate::rewrite::{rewrite_tree, RewriteReport, WalkOptions};
use crate::util::config::Config;
use crate::util::fs::{
    copy_dir_all, ensure_dir, is_inside, normalize_path, relative_path, remove_dir_all_if_exists,
    strip_dirs,
};
use crate::util::shell::{Shell, Status};
use crate::util::GlobalContext;

/// Options for vendoring a package.
#[derive(Debug, Clone)]
pub struct VendorOptions {
    /// Package to vendor
    pub package: PackageId,

    /// Copy the package into the current tree
    pub copy: bool,

    /// Rewrite imports of the package
    pub rewrite: bool,

    /// Subdirectory to vendor into (e.g., third_party)
    pub prefix: Option<String>,

    /// Number of parallel rewrite jobs
    pub jobs: Option<usize>,

    /// Directories removed from the copy
    pub strip_dirs: Vec<String>,

    /// Formatter command, None to skip formatting
    pub format: Option<Vec<String>>,
}

impl VendorOptions {
    /// Options taken from the configuration, with copy and rewrite enabled.
    pub fn from_config(package: PackageId, config: &Config) -> Self {
        VendorOptions {
            package,
            copy: true,
            rewrite: true,
            prefix: config.vendor.prefix.clone(),
            jobs: config.rewrite.jobs,
            strip_dirs: config.vendor.strip_dirs.clone(),
            format: config
                .format
                .enabled
                .then(|| config.format.command.clone()),
        }
    }

    /// The prefix with surrounding slashes removed, if any is left.
    fn prefix(&self) -> Option<&str> {
        self.prefix
            .as_deref()
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
    }
}

/// What a vendoring run did.
#[derive(Debug, Clone, Serialize)]
pub struct VendorResult {
    pub package: PackageId,
    /// The current tree's own import path
    pub own: PackageId,
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub mapping: RewriteMapping,
    pub copied: bool,
    /// VCS directories removed from the copy
    pub stripped: Vec<PathBuf>,
    /// Present when the rewrite phase ran
    pub report: Option<RewriteReport>,
    pub formatted: bool,
}

/// Vendor a package into the current tree.
pub fn vendor(ctx: &GlobalContext, opts: &VendorOptions, shell: &Shell) -> Result<VendorResult> {
    let package = &opts.package;

    let source_dir = ctx.roots().require_package(package)?;
    tracing::debug!("Found package path: {}", source_dir.display());
    shell.status(Status::Found, format!("{} at {}", package, source_dir.display()));

    let own = ctx.roots().resolve_current_package(ctx.cwd())?;
    let mapping = RewriteMapping::new(package.clone(), &own, opts.prefix())?;

    let relative_dest = match opts.prefix() {
        Some(prefix) => PackageId::new(prefix)?
            .to_relative_path()
            .join(package.to_relative_path()),
        None => package.to_relative_path(),
    };
    tracing::debug!("Using relative path: {}", relative_dest.display());
    let dest_dir = ctx.cwd().join(&relative_dest);

    let mut stripped = Vec::new();
    if opts.copy {
        check_overlap(&source_dir, &dest_dir)?;
        tracing::debug!("Copying {} into {}", source_dir.display(), dest_dir.display());
        shell.status(Status::Copying, format!("{} into {}", package, relative_dest.display()));

        remove_dir_all_if_exists(&dest_dir)?;
        ensure_dir(&dest_dir)?;
        copy_dir_all(&source_dir, &dest_dir).with_context(|| {
            format!("failed to copy {} into {}", package, dest_dir.display())
        })?;

        stripped = strip_dirs(&dest_dir, &opts.strip_dirs)?;
        for dir in &stripped {
            shell.status(Status::Removed, relative_path(ctx.cwd(), dir).display());
        }
    }

    let mut report = None;
    let mut formatted = false;
    if opts.rewrite {
        tracing::debug!("Adding prefix {} to {}", mapping.new_id(), package);
        shell.status(
            Status::Rewriting,
            format!("{} -> {}", mapping.old(), mapping.new_id()),
        );

        let walk = WalkOptions { jobs: opts.jobs };
        let result = rewrite_tree(ctx.cwd(), &mapping, &walk)?;

        for file in &result.rewritten {
            shell.status(Status::Rewrote, relative_path(ctx.cwd(), &file.path).display());
        }
        report = Some(result);

        if let Some(command) = &opts.format {
            shell.status(Status::Formatting, command.join(" "));
            format_tree(ctx.cwd(), command)?;
            formatted = true;
        }
    }

    Ok(VendorResult {
        package: package.clone(),
        own,
        source_dir,
        dest_dir,
        mapping,
        copied: opts.copy,
        stripped,
        report,
        formatted,
    })
}

/// Refuse to copy a package into itself, or to delete the origin while
/// clearing the destination.
fn check_overlap(source: &Path, dest: &Path) -> Result<(), GovenError> {
    let source = normalize_path(source);
    let dest = normalize_path(dest);
    if is_inside(&dest, &source) || is_inside(&source, &dest) {
        return Err(GovenError::Resolution {
            message: format!(
                "destination {} overlaps the package source {}",
                dest.display(),
                source.display()
            ),
        });
    }
    Ok(())
}
