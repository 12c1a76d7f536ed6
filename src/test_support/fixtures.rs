//! Test fixtures for common test scenarios.
//!
//! A [`GopathFixture`] lays out a fake GOPATH with a third-party package
//! and a project that imports it, which is what a vendoring run expects.

use std::path::{Path, PathBuf};

use crate::core::{PackageId, WorkspaceRoots};
use crate::test_support::GoTree;

/// Import path of the third-party package in the fixture.
pub const VENDORED_PACKAGE: &str = "host.example/pkg";

/// Import path of the project in the fixture.
pub const PROJECT_PACKAGE: &str = "proj.example/app";

/// A GOPATH with `host.example/pkg` and `proj.example/app` under `src/`.
#[derive(Debug)]
pub struct GopathFixture {
    tree: GoTree,
}

impl GopathFixture {
    /// Create the fixture with the default package and project sources.
    pub fn new() -> Self {
        let tree = GoTree::new()
            .file(
                "src/host.example/pkg/pkg.go",
                "package pkg\n\nimport \"host.example/pkg/sub\"\n\nfunc Hello() string { return sub.Name }\n",
            )
            .file(
                "src/host.example/pkg/sub/sub.go",
                "package sub\n\nconst Name = \"sub\"\n",
            )
            .file("src/host.example/pkg/.git/HEAD", "ref: refs/heads/main\n")
            .file("src/host.example/pkg/.hg/store", "")
            .file("src/host.example/pkg/.travis.yml", "language: go\n")
            .file(
                "src/proj.example/app/main.go",
                "package main\n\nimport (\n\t\"fmt\"\n\n\tp2 \"host.example/pkg\"\n\t\"host.example/pkgextra\"\n)\n\nfunc main() { fmt.Println(p2.Hello(), pkgextra.X) }\n",
            )
            .file(
                "src/host.example/pkgextra/extra.go",
                "package pkgextra\n\nconst X = 1\n",
            );
        GopathFixture { tree }
    }

    /// The GOPATH root.
    pub fn root(&self) -> &Path {
        self.tree.path()
    }

    /// Workspace roots containing only this GOPATH.
    pub fn roots(&self) -> WorkspaceRoots {
        WorkspaceRoots::new(vec![self.root().to_path_buf()])
    }

    /// Directory of the project.
    pub fn project_dir(&self) -> PathBuf {
        self.root().join("src").join(PROJECT_PACKAGE)
    }

    /// Directory of the third-party package.
    pub fn package_dir(&self) -> PathBuf {
        self.root().join("src").join(VENDORED_PACKAGE)
    }

    /// The vendored package's identifier.
    pub fn package_id(&self) -> PackageId {
        PackageId::new(VENDORED_PACKAGE).expect("valid fixture package")
    }

    /// The underlying tree.
    pub fn tree(&self) -> &GoTree {
        &self.tree
    }
}

impl Default for GopathFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let fixture = GopathFixture::new();
        assert!(fixture.package_dir().join("pkg.go").exists());
        assert!(fixture.project_dir().join("main.go").exists());
        assert_eq!(
            fixture.roots().locate_package(&fixture.package_id()),
            Some(fixture.package_dir())
        );
    }
}
