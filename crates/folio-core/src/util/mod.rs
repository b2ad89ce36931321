//! Utility modules for file operations, path handling, and slugs.
//!
//! # Modules
//!
//! - [`files`]: Async file discovery and reading utilities
//! - [`ids`]: Slug derivation from file names
//! - [`paths`]: Path resolution helpers (tilde expansion, config dirs)

pub mod files;
pub mod ids;
pub mod paths;
