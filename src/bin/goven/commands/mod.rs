//! Command implementations

pub mod completions;
pub mod locate;
pub mod vendor;
