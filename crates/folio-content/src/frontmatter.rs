//! YAML frontmatter for project documents.
//!
//! A document may open with a `---` line, a YAML block, and a closing `---`
//! line. Everything after the closing line is the markdown body.

use folio_core::{Error, Result};
use serde::{Deserialize, Serialize};

const FENCE: &str = "---";

/// Header block of a project document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFrontmatter {
    /// Full project title, e.g. `"Lumen: Video Conferencing"`.
    pub title: String,
    /// One-line description.
    pub description: String,
    /// Optional image path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Optional external link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ProjectFrontmatter {
    /// The title up to its first `:`, trimmed.
    ///
    /// ```
    /// use folio_content::ProjectFrontmatter;
    ///
    /// let fm = ProjectFrontmatter {
    ///     title: "Nexus: Inventory Dashboard".into(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(fm.short_title(), "Nexus");
    /// ```
    pub fn short_title(&self) -> &str {
        self.title.split(':').next().unwrap_or_default().trim()
    }
}

/// Split a document into its YAML block (if any) and body.
pub fn split_frontmatter(text: &str) -> (Option<&str>, &str) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(after_open) = strip_fence_line(text) else {
        return (None, text);
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, text)
}

/// The text after an opening `---` line, if `text` starts with one.
fn strip_fence_line(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(FENCE)?;
    let (line, after) = match rest.find('\n') {
        Some(i) => (&rest[..i], &rest[i + 1..]),
        None => (rest, ""),
    };
    line.trim().is_empty().then_some(after)
}

/// Parse frontmatter and return it with the body.
///
/// A document without frontmatter gets [`ProjectFrontmatter::default`].
///
/// # Errors
///
/// Returns [`Error::Parse`] if the YAML block is malformed.
pub fn parse_frontmatter(text: &str) -> Result<(ProjectFrontmatter, &str)> {
    match split_frontmatter(text) {
        (Some(yaml), body) if yaml.trim().is_empty() => Ok((ProjectFrontmatter::default(), body)),
        (Some(yaml), body) => {
            let frontmatter: ProjectFrontmatter = serde_yaml::from_str(yaml)
                .map_err(|e| Error::parse(format!("invalid frontmatter: {e}")))?;
            Ok((frontmatter, body))
        }
        (None, body) => Ok((ProjectFrontmatter::default(), body)),
    }
}
