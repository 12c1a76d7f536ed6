//! Core data structures for goven.
//!
//! This module contains the foundational types used throughout goven:
//! - Package identifiers and their segment-aware matching
//! - The rewrite mapping applied during a tree walk
//! - Workspace roots (GOPATH) and package lookup
//! - The domain error taxonomy

pub mod errors;
pub mod mapping;
pub mod package_id;
pub mod workspace;

pub use errors::GovenError;
pub use mapping::RewriteMapping;
pub use package_id::PackageId;
pub use workspace::{WorkspaceRoots, GOPATH_ENV};
