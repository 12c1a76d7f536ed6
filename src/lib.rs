//! goven - vendor a Go package into the current project
//!
//! This crate copies a package from a GOPATH workspace into the current
//! tree and rewrites every import of it so the copy is used instead of the
//! original.

pub mod core;
pub mod ops;
pub mod rewrite;
pub mod util;

/// Fake GOPATH workspaces for unit tests.
#[cfg(test)]
pub mod test_support;

pub use core::{GovenError, PackageId, RewriteMapping, WorkspaceRoots};
pub use rewrite::{rewrite_tree, RewriteReport};
pub use util::context::GlobalContext;
