//! Shell output for the goven CLI.
//!
//! Human mode prints right-aligned status lines to stderr; JSON mode prints
//! one event object per line to stdout and nothing else. The two modes are
//! mutually exclusive.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Shell output mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellMode {
    /// Human-readable status lines.
    Human {
        verbosity: Verbosity,
        color: ColorChoice,
    },
    /// Machine-readable JSON events only.
    Json,
}

impl Default for ShellMode {
    fn default() -> Self {
        ShellMode::Human {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
        }
    }
}

/// Output verbosity level (Human mode only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: errors only
    Quiet,
    #[default]
    Normal,
    /// --verbose: per-file lines as well
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Semantic status of an output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // green
    Finished,
    Removed,
    Rewrote,

    // cyan
    Vendoring,
    Copying,
    Rewriting,
    Formatting,

    // blue
    Found,

    // yellow
    Warning,

    // red
    Error,
}

impl Status {
    const WIDTH: usize = 12;

    fn as_str(&self) -> &'static str {
        match self {
            Status::Finished => "Finished",
            Status::Removed => "Removed",
            Status::Rewrote => "Rewrote",
            Status::Vendoring => "Vendoring",
            Status::Copying => "Copying",
            Status::Rewriting => "Rewriting",
            Status::Formatting => "Formatting",
            Status::Found => "Found",
            Status::Warning => "Warning",
            Status::Error => "error",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Finished | Status::Removed | Status::Rewrote => "\x1b[1;32m",
            Status::Vendoring
            | Status::Copying
            | Status::Rewriting
            | Status::Formatting => "\x1b[1;36m",
            Status::Found => "\x1b[1;34m",
            Status::Warning => "\x1b[1;33m",
            Status::Error => "\x1b[1;31m",
        }
    }

    /// Statuses that only show up with --verbose.
    fn is_detail(&self) -> bool {
        matches!(self, Status::Rewrote | Status::Removed)
    }
}

/// Central shell for all CLI output.
#[derive(Debug)]
pub struct Shell {
    mode: ShellMode,
    use_color: bool,
}

impl Shell {
    pub fn new(mode: ShellMode) -> Self {
        let use_color = match &mode {
            ShellMode::Json => false,
            ShellMode::Human { color, .. } => match color {
                ColorChoice::Auto => io::stderr().is_terminal(),
                ColorChoice::Always => true,
                ColorChoice::Never => false,
            },
        };

        Shell { mode, use_color }
    }

    /// Create a shell from CLI flags. JSON mode takes precedence over
    /// quiet and verbose.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice, json: bool) -> Self {
        if json {
            return Shell::new(ShellMode::Json);
        }
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Shell::new(ShellMode::Human { verbosity, color })
    }

    pub fn mode(&self) -> &ShellMode {
        &self.mode
    }

    pub fn is_quiet(&self) -> bool {
        matches!(
            self.mode,
            ShellMode::Human {
                verbosity: Verbosity::Quiet,
                ..
            }
        )
    }

    pub fn is_json(&self) -> bool {
        matches!(self.mode, ShellMode::Json)
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Whether a line with this status would be printed.
    pub fn shows(&self, status: Status) -> bool {
        match &self.mode {
            ShellMode::Json => false,
            ShellMode::Human { verbosity, .. } => match verbosity {
                Verbosity::Quiet => status == Status::Error,
                Verbosity::Normal => !status.is_detail(),
                Verbosity::Verbose => true,
            },
        }
    }

    /// Print `{status:>12} {message}` to stderr.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.shows(status) {
            eprintln!("{} {}", self.format_status(status), msg);
        }
    }

    pub fn warn(&self, msg: impl Display) {
        self.status(Status::Warning, msg);
    }

    /// Print an error, as a JSON event in JSON mode.
    pub fn error(&self, msg: impl Display) {
        if self.is_json() {
            self.json_event(&serde_json::json!({
                "reason": "error",
                "message": msg.to_string(),
            }));
        } else {
            self.status(Status::Error, msg);
        }
    }

    /// Print one JSON event line to stdout. Ignored in human mode.
    pub fn json_event<T: Serialize + ?Sized>(&self, event: &T) {
        if !self.is_json() {
            return;
        }
        match serde_json::to_string(event) {
            Ok(line) => {
                let mut out = io::stdout().lock();
                let _ = writeln!(out, "{}", line);
                let _ = out.flush();
            }
            Err(e) => tracing::warn!("failed to serialize event: {}", e),
        }
    }

    fn format_status(&self, status: Status) -> String {
        if self.use_color {
            format!(
                "{}{:>width$}\x1b[0m",
                status.color_code(),
                status.as_str(),
                width = Status::WIDTH
            )
        } else {
            format!("{:>width$}", status.as_str(), width = Status::WIDTH)
        }
    }

    /// Start a timed span; finishing it prints `Finished {msg} in {time}`.
    pub fn span(&self, status: Status, msg: impl Display) -> Span<'_> {
        self.status(status, &msg);
        Span {
            shell: self,
            start: Instant::now(),
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(ShellMode::default())
    }
}

/// A timed phase of work.
pub struct Span<'a> {
    shell: &'a Shell,
    start: Instant,
}

impl Span<'_> {
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish_with_message(self, msg: impl Display) {
        let elapsed = format_duration(self.elapsed());
        self.shell
            .status(Status::Finished, format!("{} in {}", msg, elapsed));
    }
}

/// Format a duration in a human-readable way.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human(verbosity: Verbosity) -> Shell {
        Shell::new(ShellMode::Human {
            verbosity,
            color: ColorChoice::Never,
        })
    }

    #[test]
    fn test_shell_modes() {
        let shell = human(Verbosity::Normal);
        assert!(!shell.is_quiet());
        assert!(!shell.shows(Status::Removed));
        assert!(!shell.is_json());
        assert!(!shell.use_color());

        assert!(human(Verbosity::Quiet).is_quiet());
        assert!(Shell::new(ShellMode::Json).is_json());
    }

    #[test]
    fn test_color_choice_parse() {
        assert_eq!("auto".parse::<ColorChoice>().unwrap(), ColorChoice::Auto);
        assert_eq!("Always".parse::<ColorChoice>().unwrap(), ColorChoice::Always);
        assert_eq!("never".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
        assert!("sometimes".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn test_visibility_by_verbosity() {
        let quiet = human(Verbosity::Quiet);
        assert!(quiet.shows(Status::Error));
        assert!(!quiet.shows(Status::Finished));

        let normal = human(Verbosity::Normal);
        assert!(normal.shows(Status::Copying));
        assert!(!normal.shows(Status::Rewrote));

        let verbose = human(Verbosity::Verbose);
        assert!(verbose.shows(Status::Rewrote));

        assert!(!Shell::new(ShellMode::Json).shows(Status::Error));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "0.50s");
        assert_eq!(format_duration(Duration::from_secs(2)), "2.00s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1.5m");
    }

    #[test]
    fn test_status_is_right_aligned() {
        let shell = human(Verbosity::Normal);
        let formatted = shell.format_status(Status::Copying);
        assert_eq!(formatted, "     Copying");
        assert_eq!(formatted.len(), 12);
    }

    #[test]
    fn test_from_flags() {
        assert!(Shell::from_flags(true, false, ColorChoice::Auto, false).is_quiet());
        assert!(Shell::from_flags(false, true, ColorChoice::Auto, false).shows(Status::Removed));

        let shell = Shell::from_flags(true, true, ColorChoice::Auto, true);
        assert!(shell.is_json());
        assert!(!shell.is_quiet());
    }
}
