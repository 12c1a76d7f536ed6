//! Rewrite mapping - where a vendored package's imports now point.

use serde::Serialize;

use crate::core::errors::GovenError;
use crate::core::PackageId;

/// The substitution applied to every import during a rewrite walk.
///
/// `new` is the destination tree's own identifier, joined with the optional
/// subdirectory prefix, joined with `old`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteMapping {
    old: PackageId,
    new: PackageId,
}

impl RewriteMapping {
    /// Assemble the mapping for vendoring `old` into the tree identified by
    /// `own`, optionally below `prefix`.
    pub fn new(old: PackageId, own: &PackageId, prefix: Option<&str>) -> Result<Self, GovenError> {
        let mut new = own.clone();
        if let Some(prefix) = prefix {
            new = new.join(prefix)?;
        }
        let new = new.join(old.as_str())?;
        Ok(RewriteMapping { old, new })
    }

    /// Build a mapping from explicit identifiers.
    pub fn from_parts(old: PackageId, new: PackageId) -> Self {
        RewriteMapping { old, new }
    }

    /// The package's original import path.
    pub fn old(&self) -> &PackageId {
        &self.old
    }

    /// The package's import path inside the destination tree.
    pub fn new_id(&self) -> &PackageId {
        &self.new
    }

    /// Compute the replacement for an import path, if it must change.
    ///
    /// Paths already under the new identifier are left alone, which keeps
    /// repeated runs stable even when the new identifier lies below the old.
    pub fn rewrite(&self, import_path: &str) -> Option<String> {
        if self.new.contains(import_path) {
            return None;
        }
        let rest = self.old.strip_from(import_path)?;
        Some(format!("{}{}", self.new, rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PackageId {
        PackageId::new(s).unwrap()
    }

    #[test]
    fn test_mapping_without_prefix() {
        let m = RewriteMapping::new(id("host.example/pkg"), &id("proj.example/app"), None).unwrap();
        assert_eq!(m.new_id().as_str(), "proj.example/app/host.example/pkg");
        assert_eq!(
            m.rewrite("host.example/pkg/sub").as_deref(),
            Some("proj.example/app/host.example/pkg/sub")
        );
    }

    #[test]
    fn test_mapping_with_prefix() {
        let m = RewriteMapping::new(
            id("host.example/pkg"),
            &id("proj.example/app"),
            Some("third_party"),
        )
        .unwrap();
        assert_eq!(
            m.rewrite("host.example/pkg/sub").as_deref(),
            Some("proj.example/app/third_party/host.example/pkg/sub")
        );
    }

    #[test]
    fn test_empty_prefix_is_ignored() {
        let m = RewriteMapping::new(id("a/b"), &id("c"), Some("")).unwrap();
        assert_eq!(m.new_id().as_str(), "c/a/b");
    }

    #[test]
    fn test_rewrite_exact_match() {
        let m = RewriteMapping::new(id("foo"), &id("bar"), None).unwrap();
        assert_eq!(m.rewrite("foo").as_deref(), Some("bar/foo"));
    }

    #[test]
    fn test_rewrite_ignores_string_prefix() {
        let m = RewriteMapping::new(id("pkg"), &id("app"), None).unwrap();
        assert_eq!(m.rewrite("pkgextra"), None);
        assert_eq!(m.rewrite("pkgextra/sub"), None);
        assert_eq!(m.rewrite("fmt"), None);
    }

    #[test]
    fn test_rewrite_leaves_new_location_alone() {
        let m = RewriteMapping::new(id("a/b"), &id("a/b/c"), None).unwrap();
        assert_eq!(m.new_id().as_str(), "a/b/c/a/b");
        assert_eq!(m.rewrite("a/b/c/a/b"), None);
        assert_eq!(m.rewrite("a/b/c/a/b/sub"), None);
        assert_eq!(m.rewrite("a/b/x").as_deref(), Some("a/b/c/a/b/x"));
    }

    #[test]
    fn test_rewrite_leaves_own_package_alone() {
        let m = RewriteMapping::new(id("host.example/pkg"), &id("proj.example/app"), None).unwrap();
        assert_eq!(m.rewrite("proj.example/app"), None);
    }
}
