//! Display metadata keyed by project slug.
//!
//! The metadata table supplies what the documents themselves do not carry:
//! a display date, an accent color, and the full tech list. It is a plain
//! read-only value handed to whoever needs it.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use folio_core::util::files::read_file;
use folio_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Display metadata for one project.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMetadata {
    /// Display date, `"Mon YYYY"` or `"Month YYYY"`.
    pub date: String,
    /// Full tech list.
    pub tech: Vec<String>,
    /// Accent color, CSS hex.
    pub color: String,
}

impl ProjectMetadata {
    /// Build an entry.
    pub fn new(date: &str, tech: &[&str], color: &str) -> Self {
        Self {
            date: date.to_string(),
            tech: tech.iter().map(|t| (*t).to_string()).collect(),
            color: color.to_string(),
        }
    }

    /// The date as the first day of its month, if it parses.
    pub fn sort_date(&self) -> Option<NaiveDate> {
        parse_month_year(&self.date)
    }
}

/// Read-only map from slug to [`ProjectMetadata`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataTable {
    entries: BTreeMap<String, ProjectMetadata>,
}

impl MetadataTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The portfolio's own projects.
    pub fn builtin() -> Self {
        [
            (
                "axion-assistant",
                ProjectMetadata::new(
                    "Sep 2025",
                    &["Next.js", "React", "TypeScript", "Google Gemini API"],
                    "#0ea5e9",
                ),
            ),
            (
                "imaginify",
                ProjectMetadata::new(
                    "Aug 2025",
                    &["Next.js", "React", "TypeScript", "Cloudinary AI", "Stripe API"],
                    "#e11d48",
                ),
            ),
            (
                "lumen",
                ProjectMetadata::new(
                    "May 2025",
                    &["Next.js", "React", "TypeScript", "Convex", "Stream SDK"],
                    "#eab308",
                ),
            ),
            (
                "nexus",
                ProjectMetadata::new(
                    "June 2025",
                    &["Next.js", "React", "TypeScript", "Prisma", "PostgreSQL"],
                    "#0ea5e9",
                ),
            ),
            (
                "revo",
                ProjectMetadata::new(
                    "July 2025",
                    &["Next.js", "React", "Three.js", "React Three Fiber", "GSAP"],
                    "#e11d48",
                ),
            ),
        ]
        .into_iter()
        .collect()
    }

    /// Parse a TOML table of `[slug]` sections.
    ///
    /// ```
    /// use folio_content::MetadataTable;
    ///
    /// let table = MetadataTable::from_toml_str(r##"
    ///     [revo]
    ///     date = "July 2025"
    ///     tech = ["Three.js", "GSAP"]
    ///     color = "#e11d48"
    /// "##).unwrap();
    /// assert_eq!(table.get("revo").unwrap().tech, vec!["Three.js", "GSAP"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] on malformed TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::parse(format!("invalid metadata table: {e}")))
    }

    /// Load a TOML table from disk.
    pub async fn load(path: &Path) -> Result<Self> {
        let text = read_file(path).await?;
        let table = Self::from_toml_str(&text)?;
        log::debug!("loaded {} metadata entries from {}", table.len(), path.display());
        Ok(table)
    }

    /// Metadata for `slug`.
    pub fn get(&self, slug: &str) -> Option<&ProjectMetadata> {
        self.entries.get(slug)
    }

    /// Whether `slug` has an entry.
    pub fn contains(&self, slug: &str) -> bool {
        self.entries.contains_key(slug)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All slugs, sorted.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Order two slugs newest first by their metadata dates.
    ///
    /// Slugs without a parseable date sort after dated ones; ties fall back
    /// to slug order.
    pub fn compare_newest_first(&self, a: &str, b: &str) -> Ordering {
        let date_a = self.get(a).and_then(ProjectMetadata::sort_date);
        let date_b = self.get(b).and_then(ProjectMetadata::sort_date);
        match (date_a, date_b) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| a.cmp(b))
    }
}

impl<S: Into<String>> FromIterator<(S, ProjectMetadata)> for MetadataTable {
    fn from_iter<I: IntoIterator<Item = (S, ProjectMetadata)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Parse `"Sep 2025"` / `"september 2025"` into the first of that month.
pub fn parse_month_year(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }
    ["%d %b %Y", "%d %B %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&format!("1 {date}"), fmt).ok())
}
