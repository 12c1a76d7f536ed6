//! Import path rewriting.
//!
//! Each Go file goes through the same pipeline: read, parse it with the
//! tree-sitter Go grammar, apply the [`RewriteMapping`], and, only when an
//! import changed, render the file and atomically replace the original.
//! Files are independent of each other, so [`walk::rewrite_tree`] processes
//! them in parallel.

pub mod literal;
pub mod source;
pub mod walk;

use std::fs;
use std::path::Path;

use crate::core::{GovenError, RewriteMapping};
use crate::util::fs::write_atomic;

pub use source::{GoSource, ImportSpec, ParseError};
pub use walk::{rewrite_tree, RewriteReport, SkipKind, SkippedFile, WalkOptions};

/// Extension of the source files whose imports are rewritten.
pub const SOURCE_EXTENSION: &str = "go";

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file was rewritten; `imports` declarations changed.
    Rewritten { imports: usize },
    /// Nothing matched; the file was not touched.
    Unchanged,
}

/// Rewrite the imports of one file in place.
pub fn rewrite_file(path: &Path, mapping: &RewriteMapping) -> Result<FileOutcome, GovenError> {
    let bytes = fs::read(path).map_err(|e| GovenError::io("read", path, e))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        let valid = e.utf8_error().valid_up_to();
        let prefix = String::from_utf8_lossy(&e.as_bytes()[..valid]).into_owned();
        let (line, column) = source::line_column(&prefix, valid);
        GovenError::Parse {
            path: path.to_path_buf(),
            line,
            column,
            message: "invalid UTF-8 encoding".to_string(),
        }
    })?;

    let mut source = GoSource::parse(text).map_err(|e| GovenError::Parse {
        path: path.to_path_buf(),
        line: e.line,
        column: e.column,
        message: e.message,
    })?;
    tracing::trace!(
        "{}: package {}, {} imports",
        path.display(),
        source.package_name(),
        source.imports().len()
    );

    let imports = source.rewrite_imports(mapping);
    if imports == 0 {
        return Ok(FileOutcome::Unchanged);
    }

    let rendered = source.render().map_err(|e| GovenError::Serialize {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    write_atomic(path, rendered.as_bytes()).map_err(|e| GovenError::io("write", path, e))?;

    tracing::debug!("Modified {}", path.display());
    Ok(FileOutcome::Rewritten { imports })
}
