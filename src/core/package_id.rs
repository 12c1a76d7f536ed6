//! Package identification - the import path naming a Go package.
//!
//! A PackageId is a slash-delimited import path such as
//! `github.com/bmizerany/pat`. Identifiers are matched by path segment,
//! never by raw string prefix, so `foo/bar` does not contain `foo/barbaz`.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::GovenError;

/// A validated package import path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageId {
    path: String,
}

impl PackageId {
    /// Create a package ID from an import path.
    pub fn new(path: impl Into<String>) -> Result<Self, GovenError> {
        let path = path.into();
        validate(&path)?;
        Ok(PackageId { path })
    }

    /// Build a package ID from a relative filesystem path, joining its
    /// components with `/`.
    pub fn from_relative_path(path: &Path) -> Result<Self, GovenError> {
        let mut segments = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => {
                    let part = part.to_str().ok_or_else(|| GovenError::Resolution {
                        message: format!("`{}` is not valid UTF-8", path.display()),
                    })?;
                    segments.push(part);
                }
                Component::CurDir => {}
                _ => {
                    return Err(GovenError::Resolution {
                        message: format!("`{}` is not a relative package path", path.display()),
                    })
                }
            }
        }
        PackageId::new(segments.join("/"))
    }

    /// The import path as a string.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Iterate over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/')
    }

    /// Convert to a relative filesystem path.
    pub fn to_relative_path(&self) -> PathBuf {
        self.segments().collect()
    }

    /// Check whether `import_path` is this package or one of its subpackages.
    pub fn contains(&self, import_path: &str) -> bool {
        self.strip_from(import_path).is_some()
    }

    /// If `import_path` is this package or below it, return the remainder
    /// after this package's path. The remainder is empty or starts with `/`.
    pub fn strip_from<'a>(&self, import_path: &'a str) -> Option<&'a str> {
        let rest = import_path.strip_prefix(self.path.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }

    /// Append further segments, yielding a new identifier.
    pub fn join(&self, other: &str) -> Result<PackageId, GovenError> {
        let other = other.trim_matches('/');
        if other.is_empty() {
            return Ok(self.clone());
        }
        PackageId::new(format!("{}/{}", self.path, other))
    }
}

fn validate(path: &str) -> Result<(), GovenError> {
    let invalid = |reason: &str| GovenError::Resolution {
        message: format!("invalid package path `{}`: {}", path, reason),
    };

    if path.is_empty() {
        return Err(invalid("path is empty"));
    }
    if path.contains('\\') {
        return Err(invalid("backslashes are not allowed"));
    }
    for segment in path.split('/') {
        match segment {
            "" => return Err(invalid("empty path segment")),
            "." | ".." => return Err(invalid("relative path segments are not allowed")),
            _ => {}
        }
    }
    Ok(())
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl FromStr for PackageId {
    type Err = GovenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageId::new(s)
    }
}

impl TryFrom<String> for PackageId {
    type Error = GovenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PackageId::new(value)
    }
}

impl From<PackageId> for String {
    fn from(id: PackageId) -> Self {
        id.path
    }
}

impl AsRef<str> for PackageId {
    fn as_ref(&self) -> &str {
        &self.path
    }
}
