//! User-facing diagnostic messages.
//!
//! A diagnostic carries the primary message plus the context a user needs to
//! act on it: where goven looked, which file was involved, and what to try
//! next.

use std::fmt;
use std::path::PathBuf;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    fn with_severity(message: impl Into<String>, severity: Severity) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_severity(message, Severity::Error)
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(message, Severity::Warning)
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let label = match (self.severity, color) {
            (Severity::Error, true) => "\x1b[1;31merror\x1b[0m",
            (Severity::Warning, true) => "\x1b[1;33mwarning\x1b[0m",
            (Severity::Error, false) => "error",
            (Severity::Warning, false) => "warning",
        };

        let mut output = format!("{}: {}\n", label, self.message);

        if let Some(path) = &self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  -> {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            let help = if color { "\x1b[1;32mhelp\x1b[0m" } else { "help" };
            output.push('\n');
            if let [only] = self.suggestions.as_slice() {
                output.push_str(&format!("{}: {}\n", help, only));
            } else {
                output.push_str(&format!("{}: consider:\n", help));
                for (i, suggestion) in self.suggestions.iter().enumerate() {
                    output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
                }
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("could not find package `github.com/bmizerany/pat`")
            .with_context("looked in /go/src/github.com/bmizerany/pat")
            .with_suggestion("fetch it first with `go get <package>`");

        let output = diag.format(false);
        assert!(output.starts_with("error: could not find package"));
        assert!(output.contains("  -> looked in /go/src/github.com/bmizerany/pat"));
        assert!(output.contains("help: fetch it first"));
    }

    #[test]
    fn test_multiple_suggestions_are_numbered() {
        let diag = Diagnostic::warning("formatter not found")
            .with_suggestion("install gofmt")
            .with_suggestion("pass --no-format");

        let output = diag.format(false);
        assert!(output.starts_with("warning: formatter not found"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("  1. install gofmt"));
        assert!(output.contains("  2. pass --no-format"));
    }

    #[test]
    fn test_location_and_color() {
        let diag = Diagnostic::error("failed to parse").with_location("a/b.go");
        let plain = diag.format(false);
        assert!(plain.contains("  --> a/b.go"));

        let colored = diag.format(true);
        assert!(colored.contains("\x1b[1;31merror\x1b[0m"));
    }
}
