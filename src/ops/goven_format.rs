//! Running the Go formatter over a tree after imports were rewritten.

use std::path::Path;

use anyhow::{anyhow, Result};

use crate::util::process::{find_executable, ProcessBuilder};

/// Run `command` (program plus arguments) in `root`.
///
/// A formatter that is missing or exits unsuccessfully is an error; files
/// already rewritten stay as they are.
pub fn format_tree(root: &Path, command: &[String]) -> Result<()> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| anyhow!("formatter command is empty"))?;

    let exe = find_executable(program)
        .ok_or_else(|| anyhow!("formatter `{}` not found in PATH", program))?;

    ProcessBuilder::new(exe).args(args).cwd(root).exec_and_check()?;
    tracing::debug!("Formatted {} with `{}`", root.display(), command.join(" "));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_command() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = format_tree(tmp.path(), &[]).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_missing_formatter() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err =
            format_tree(tmp.path(), &command(&["goven-no-such-gofmt", "-w", "."])).unwrap_err();
        assert!(err.to_string().contains("`goven-no-such-gofmt` not found"));
    }

    #[cfg(unix)]
    #[test]
    fn test_formatter_runs_in_root() {
        let tmp = tempfile::TempDir::new().unwrap();
        format_tree(tmp.path(), &command(&["touch", "formatted"])).unwrap();
        assert!(tmp.path().join("formatted").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_formatter() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(format_tree(tmp.path(), &command(&["false"])).is_err());
    }
}
