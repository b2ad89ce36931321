//! Slug derivation.
//!
//! A project's slug is its file stem, lowercased, with every run of
//! whitespace collapsed to a single `-`. The same slug keys the metadata
//! table, so both sides must agree on this normalization.

use std::path::Path;

/// Normalize a raw identifier into a slug.
///
/// ```
/// use folio_core::slugify;
///
/// assert_eq!(slugify("Axion Assistant"), "axion-assistant");
/// assert_eq!(slugify("revo"), "revo");
/// ```
pub fn slugify(raw: &str) -> String {
    raw.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Derive a slug from a file path's stem.
///
/// Returns `None` when the path has no UTF-8 file stem.
pub fn slug_from_path(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(slugify)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_slugify_lowercases() {
        assert_eq!(slugify("Imaginify"), "imaginify");
    }

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("My  Cool\tProject"), "my-cool-project");
    }

    #[test]
    fn test_slugify_keeps_existing_dashes() {
        assert_eq!(slugify("Axion-assistant"), "axion-assistant");
    }

    #[test]
    fn test_slugify_trims() {
        assert_eq!(slugify("  lumen "), "lumen");
    }

    #[test]
    fn test_slug_from_path() {
        let path = PathBuf::from("/content/projects/Axion Assistant.mdx");
        assert_eq!(slug_from_path(&path).as_deref(), Some("axion-assistant"));
    }

    #[test]
    fn test_slug_from_path_no_stem() {
        assert!(slug_from_path(Path::new("/")).is_none());
    }
}
