//! Project document extraction, frontmatter, metadata, and loading.
//!
//! # Modules
//!
//! - [`section`]: the section slicing primitive shared by all field scrapers
//! - [`extractor`]: best-effort extraction of display fields
//! - [`frontmatter`]: YAML header parsing
//! - [`metadata`]: read-only slug → display metadata table
//! - [`loader`]: async discovery and loading of project files
//! - [`catalog`]: joined records for rendering
//! - [`validation`]: advisory checks for degraded extractions
//! - [`markdown`]: markdown to HTML

#![doc = include_str!("../README.md")]

pub mod catalog;
pub mod extractor;
pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod metadata;
pub mod section;
pub mod validation;

pub use catalog::{Catalog, Project, ProjectPreview};
pub use extractor::{ContentExtractor, ExtractOptions, ParsedContent, parse};
pub use frontmatter::{ProjectFrontmatter, parse_frontmatter};
pub use loader::{ProjectContent, ProjectLoader};
pub use metadata::{MetadataTable, ProjectMetadata};
pub use validation::{ValidationIssue, ValidationResult, validate_catalog, validate_project};
