//! Tree walk over every Go file below a root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::core::{GovenError, RewriteMapping};
use crate::rewrite::{rewrite_file, FileOutcome, SOURCE_EXTENSION};

/// Options for a rewrite walk.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Number of worker threads (None = rayon default).
    pub jobs: Option<usize>,
}

/// Why a file was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipKind {
    /// The directory entry could not be read.
    Walk,
    /// The file is not valid Go.
    Parse,
    /// The rewritten file could not be rendered.
    Serialize,
    /// Reading or writing the file failed.
    Io,
}

/// A file rewritten during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewrittenFile {
    pub path: PathBuf,
    pub imports: usize,
}

/// A file the walk could not process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub kind: SkipKind,
    pub error: String,
}

/// Summary of a rewrite walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
    pub rewritten: Vec<RewrittenFile>,
    pub unchanged: usize,
    pub skipped: Vec<SkippedFile>,
}

impl RewriteReport {
    /// Whether every file was processed.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    fn record(&mut self, path: PathBuf, result: Result<FileOutcome, GovenError>) {
        match result {
            Ok(FileOutcome::Rewritten { imports }) => {
                self.rewritten.push(RewrittenFile { path, imports });
            }
            Ok(FileOutcome::Unchanged) => self.unchanged += 1,
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
                let kind = match e {
                    GovenError::Parse { .. } => SkipKind::Parse,
                    GovenError::Serialize { .. } => SkipKind::Serialize,
                    _ => SkipKind::Io,
                };
                self.skipped.push(SkippedFile {
                    path,
                    kind,
                    error: e.to_string(),
                });
            }
        }
    }
}

/// Rewrite the imports of every `.go` file below `root`.
///
/// Only failing to read `root` itself is an error; problems with individual
/// entries or files are recorded in the report and the walk carries on.
pub fn rewrite_tree(
    root: &Path,
    mapping: &RewriteMapping,
    opts: &WalkOptions,
) -> Result<RewriteReport, GovenError> {
    let meta = fs::metadata(root).map_err(|e| GovenError::io("read directory", root, e))?;
    if !meta.is_dir() {
        return Err(GovenError::io(
            "read directory",
            root,
            io::Error::other("not a directory"),
        ));
    }

    let mut report = RewriteReport::default();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && is_source_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) if e.depth() == 0 => {
                let path = e.path().unwrap_or(root).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("filesystem loop"));
                return Err(GovenError::io("read directory", path, source));
            }
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                tracing::warn!("skipping {}: {}", path.display(), e);
                report.skipped.push(SkippedFile {
                    path,
                    kind: SkipKind::Walk,
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::debug!("Found {} source files under {}", files.len(), root.display());

    let process = || -> Vec<(PathBuf, Result<FileOutcome, GovenError>)> {
        files
            .into_par_iter()
            .map(|path| {
                let result = rewrite_file(&path, mapping);
                (path, result)
            })
            .collect()
    };

    let results = match opts.jobs {
        Some(jobs) => match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => pool.install(process),
            Err(e) => {
                tracing::warn!("failed to create thread pool with {} jobs: {}", jobs, e);
                process()
            }
        },
        None => process(),
    };

    for (path, result) in results {
        report.record(path, result);
    }
    report.rewritten.sort_by(|a, b| a.path.cmp(&b.path));
    report.skipped.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(report)
}

fn is_source_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}
