//! Domain error types and diagnostics.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error raised while vendoring a package.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum GovenError {
    #[error("{message}")]
    #[diagnostic(
        code(goven::config),
        help("check GOPATH and the goven config files (.goven/config.toml)")
    )]
    Configuration { message: String },

    #[error("{message}")]
    #[diagnostic(code(goven::resolve))]
    Resolution { message: String },

    #[error("could not find package `{package}`")]
    #[diagnostic(code(goven::not_found), help("fetch it first with `go get <package>`"))]
    NotFound {
        package: String,
        searched: Vec<PathBuf>,
    },

    #[error("failed to {action} `{}`", .path.display())]
    #[diagnostic(code(goven::io))]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}:{line}:{column}: {message}", .path.display())]
    #[diagnostic(code(goven::parse))]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("failed to render {}: {message}", .path.display())]
    #[diagnostic(code(goven::serialize))]
    Serialize { path: PathBuf, message: String },
}

impl GovenError {
    /// Wrap an I/O error with the action and path that produced it.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        GovenError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Whether the error only affects a single file during a walk.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            GovenError::Parse { .. } | GovenError::Serialize { .. } | GovenError::Io { .. }
        )
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string());

        match self {
            GovenError::NotFound { searched, .. } => {
                for dir in searched {
                    diag = diag.with_context(format!("looked in {}", dir.display()));
                }
            }
            GovenError::Io { path, source, .. } => {
                diag = diag.with_location(path.clone()).with_context(source.to_string());
            }
            GovenError::Parse { path, .. } | GovenError::Serialize { path, .. } => {
                diag = diag.with_location(path.clone());
            }
            GovenError::Configuration { .. } | GovenError::Resolution { .. } => {}
        }

        if let Some(help) = MietteDiagnostic::help(self) {
            diag = diag.with_suggestion(help.to_string());
        }

        diag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_diagnostic() {
        let err = GovenError::NotFound {
            package: "github.com/bmizerany/pat".to_string(),
            searched: vec![PathBuf::from("/go/src/github.com/bmizerany/pat")],
        };
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("could not find package `github.com/bmizerany/pat`"));
        assert!(output.contains("looked in /go/src/github.com/bmizerany/pat"));
        assert!(output.contains("go get"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = GovenError::Parse {
            path: PathBuf::from("a/b.go"),
            line: 3,
            column: 9,
            message: "expected import path".to_string(),
        };
        assert_eq!(err.to_string(), "failed to parse a/b.go:3:9: expected import path");
        assert!(err.is_per_file());
    }

    #[test]
    fn test_configuration_is_fatal() {
        let err = GovenError::Configuration {
            message: "missing GOPATH".to_string(),
        };
        assert!(!err.is_per_file());
        assert!(err.to_diagnostic().format(false).contains("GOPATH"));
    }
}
