//! Content validation.
//!
//! Extraction never fails, so a typo in a section header silently blanks a
//! field on the site. These checks surface such degradations before
//! deployment. Errors are things a page cannot sensibly render without;
//! warnings are blank or trimmed fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::extractor::{ContentExtractor, ImpactSource};
use crate::loader::ProjectContent;
use crate::metadata::MetadataTable;

// ============================================================================
// Types
// ============================================================================

/// Result of validating one or more projects.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether no errors were found.
    pub valid: bool,
    /// Critical issues that should be fixed.
    pub errors: Vec<ValidationIssue>,
    /// Non-critical issues (warnings).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new empty (valid) result.
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error (marks the result invalid).
    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.valid = false;
        self.errors.push(issue);
    }

    /// Add a warning.
    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Total issue count (errors + warnings).
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Fold another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.valid &= other.valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// A single finding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue code, e.g. `empty_field`.
    pub code: String,
    /// Project slug.
    pub slug: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(code: impl Into<String>, slug: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            slug: slug.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate a single project.
///
/// Checks for:
/// - Missing title (error)
/// - Missing metadata entry (error)
/// - Missing description (warning)
/// - Each empty extracted field (warning)
/// - Impact sentences dropped by the length threshold (warning)
pub fn validate_project(
    project: &ProjectContent,
    extractor: &ContentExtractor,
    metadata: &MetadataTable,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    let slug = project.slug.as_str();

    if project.frontmatter.title.trim().is_empty() {
        result.add_error(ValidationIssue::new(
            "missing_title",
            slug,
            "frontmatter has no title",
        ));
    }

    if !metadata.contains(slug) {
        result.add_error(ValidationIssue::new(
            "missing_metadata",
            slug,
            "no metadata entry for this slug",
        ));
    }

    if project.frontmatter.description.trim().is_empty() {
        result.add_warning(ValidationIssue::new(
            "missing_description",
            slug,
            "frontmatter has no description",
        ));
    }

    let parsed = extractor.parse(&project.content);
    for field in parsed.empty_fields() {
        result.add_warning(ValidationIssue::new(
            "empty_field",
            slug,
            format!("extracted field '{field}' is empty"),
        ));
    }

    if let ImpactSource::Sentences { dropped } = extractor.impact(&project.content).source {
        if dropped > 0 {
            result.add_warning(ValidationIssue::new(
                "impact_sentences_dropped",
                slug,
                format!(
                    "{dropped} impact sentence(s) of {} characters or fewer were dropped",
                    extractor.options().min_sentence_len
                ),
            ));
        }
    }

    result
}

/// Validate a set of projects, including cross-project checks.
///
/// Adds an error for every slug that appears more than once.
pub fn validate_catalog(
    projects: &[ProjectContent],
    extractor: &ContentExtractor,
    metadata: &MetadataTable,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for project in projects {
        *seen.entry(project.slug.as_str()).or_default() += 1;
        result.merge(validate_project(project, extractor, metadata));
    }

    for (slug, count) in seen.into_iter().filter(|(_, count)| *count > 1) {
        result.add_error(ValidationIssue::new(
            "duplicate_slug",
            slug,
            format!("{count} files share this slug"),
        ));
    }

    result
}

// ============================================================================
// Tests
// ============================================================================
