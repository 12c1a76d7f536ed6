//! High-level operations.
//!
//! This module contains the implementation of goven commands.

pub mod goven_format;
pub mod goven_locate;
pub mod goven_vendor;

pub use goven_format::format_tree;
pub use goven_locate::{locate, LocateResult};
pub use goven_vendor::{vendor, VendorOptions, VendorResult};
