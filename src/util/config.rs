//! Configuration file support for goven.
//!
//! goven supports two configuration file locations:
//! - Global: `~/.goven/config.toml` - User-wide defaults
//! - Project: `.goven/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::GovenError;

/// goven configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Copy settings
    pub vendor: VendorConfig,

    /// Rewrite walk settings
    pub rewrite: RewriteConfig,

    /// Post-format settings
    pub format: FormatConfig,
}

/// Vendoring-related configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct VendorConfig {
    /// Default subdirectory to vendor into (e.g., third_party)
    pub prefix: Option<String>,

    /// Directories removed from the copied package
    pub strip_dirs: Vec<String>,
}

impl Default for VendorConfig {
    fn default() -> Self {
        VendorConfig {
            prefix: None,
            strip_dirs: default_strip_dirs(),
        }
    }
}

fn default_strip_dirs() -> Vec<String> {
    [".git", ".hg", ".bzr"].iter().map(|s| s.to_string()).collect()
}

/// Rewrite-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Number of parallel jobs (None = auto-detect)
    pub jobs: Option<usize>,
}

/// Formatter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Run the formatter after rewriting
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Formatter program and arguments, run in the project root
    pub command: Vec<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            enabled: true,
            command: default_format_command(),
        }
    }
}

fn default_format_command() -> Vec<String> {
    ["gofmt", "-w", "."].iter().map(|s| s.to_string()).collect()
}

fn default_true() -> bool {
    true
}

/// A config file as written on disk, where every field is optional so
/// that merging can tell "unset" from "set to the default".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    vendor: RawVendor,
    rewrite: RewriteConfig,
    format: RawFormat,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct RawVendor {
    prefix: Option<String>,
    strip_dirs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawFormat {
    enabled: Option<bool>,
    command: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, GovenError> {
        let mut config = Config::default();
        config.merge_file(path)?;
        Ok(config)
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge the settings of a config file into this one (file takes precedence).
    ///
    /// An invalid file leaves this config untouched.
    pub fn merge_file(&mut self, path: &Path) -> Result<(), GovenError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| GovenError::io("read", path, e))?;

        let raw: RawConfig = toml::from_str(&contents).map_err(|e| GovenError::Configuration {
            message: format!("failed to parse config file {}: {}", path.display(), e),
        })?;

        if raw.format.command.as_ref().is_some_and(Vec::is_empty) {
            return Err(GovenError::Configuration {
                message: format!(
                    "invalid config file {}: `format.command` must not be empty",
                    path.display()
                ),
            });
        }

        if raw.vendor.prefix.is_some() {
            self.vendor.prefix = raw.vendor.prefix;
        }
        if let Some(dirs) = raw.vendor.strip_dirs {
            self.vendor.strip_dirs = dirs;
        }
        if raw.rewrite.jobs.is_some() {
            self.rewrite.jobs = raw.rewrite.jobs;
        }
        if let Some(enabled) = raw.format.enabled {
            self.format.enabled = enabled;
        }
        if let Some(command) = raw.format.command {
            self.format.command = command;
        }

        Ok(())
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.goven/config.toml)
/// 2. Global config (~/.goven/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    for path in global_path.into_iter().chain(Some(project_path)) {
        if path.exists() {
            if let Err(e) = config.merge_file(path) {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
            }
        }
    }

    config
}

/// Get the global goven config directory (~/.goven).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".goven"))
}

/// Get the global config path (~/.goven/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.goven/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".goven").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.vendor.strip_dirs, vec![".git", ".hg", ".bzr"]);
        assert!(config.format.enabled);
        assert_eq!(config.format.command, vec!["gofmt", "-w", "."]);
        assert!(config.rewrite.jobs.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[vendor]\nprefix = \"third_party\"\n\n[rewrite]\njobs = 4\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.vendor.prefix.as_deref(), Some("third_party"));
        assert_eq!(config.vendor.strip_dirs.len(), 3);
        assert_eq!(config.rewrite.jobs, Some(4));
        assert!(config.format.enabled);
    }

    #[test]
    fn test_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = tmp.path().join("project.toml");
        std::fs::write(
            &global,
            "[vendor]\nprefix = \"vendor\"\n\n[format]\nenabled = false\n",
        )
        .unwrap();
        std::fs::write(&project, "[vendor]\nprefix = \"third_party\"\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.vendor.prefix.as_deref(), Some("third_party"));
        assert!(!config.format.enabled);
    }

    #[test]
    fn test_project_can_reenable_format() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = tmp.path().join("project.toml");
        std::fs::write(&global, "[format]\nenabled = false\n").unwrap();
        std::fs::write(
            &project,
            "[format]\nenabled = true\ncommand = [\"goimports\", \"-w\", \".\"]\n",
        )
        .unwrap();

        let config = load_config(Some(&global), &project);
        assert!(config.format.enabled);
        assert_eq!(config.format.command[0], "goimports");
    }

    #[test]
    fn test_invalid_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[rewrite]\njobs = \"many\"\n").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(GovenError::Configuration { .. })
        ));
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_empty_format_command_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[format]\ncommand = []\n").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, GovenError::Configuration { .. }));
        assert!(err.to_string().contains("format.command"));
    }

    #[test]
    fn test_rejected_file_is_not_half_merged() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = tmp.path().join("project.toml");
        std::fs::write(&global, "[vendor]\nprefix = \"vendor\"\n").unwrap();
        std::fs::write(
            &project,
            "[vendor]\nprefix = \"third_party\"\n\n[rewrite]\njobs = 8\n\n[format]\ncommand = []\n",
        )
        .unwrap();

        let config = load_config(Some(&global), &project);

        assert_eq!(config.vendor.prefix.as_deref(), Some("vendor"));
        assert!(config.rewrite.jobs.is_none());
        assert_eq!(config.format.command, vec!["gofmt", "-w", "."]);
    }

    #[test]
    fn test_missing_files_use_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));
        assert_eq!(config, Config::default());
    }
}
