//! Joined project records for rendering.
//!
//! [`Catalog`] loads documents, runs the extractor over each body, and
//! merges in the metadata table. Everything it returns is read-only data.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::extractor::{ContentExtractor, ParsedContent};
use crate::loader::{ProjectContent, ProjectLoader};
use crate::metadata::MetadataTable;

/// Everything a project page displays.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub date: String,
    pub color: String,
    pub problem: String,
    pub solution: String,
    pub features: Vec<String>,
    pub impact: Vec<String>,
    pub tech_stack: Vec<String>,
}

/// Card data for the project index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPreview {
    pub slug: String,
    /// Title up to the first `:`.
    pub title: String,
    pub description: String,
    pub date: String,
    pub tech: Vec<String>,
    pub color: String,
}

/// Loads, extracts, and joins project records.
#[derive(Clone, Debug)]
pub struct Catalog {
    loader: ProjectLoader,
    metadata: Arc<MetadataTable>,
    extractor: ContentExtractor,
}

impl Catalog {
    /// Build a catalog; the metadata table is the loader's.
    pub fn new(loader: ProjectLoader, extractor: ContentExtractor) -> Self {
        let metadata = loader.metadata_handle();
        Self {
            loader,
            metadata,
            extractor,
        }
    }

    /// The underlying loader.
    pub fn loader(&self) -> &ProjectLoader {
        &self.loader
    }

    /// The metadata table.
    pub fn metadata(&self) -> &MetadataTable {
        &self.metadata
    }

    /// The extractor.
    pub fn extractor(&self) -> &ContentExtractor {
        &self.extractor
    }

    /// Join one loaded document with its extracted fields and metadata.
    ///
    /// The tech stack comes from the document's chips; a document without
    /// chips falls back to the metadata tech list.
    pub fn assemble(&self, content: &ProjectContent) -> Project {
        let parsed = self.extractor.parse(&content.content);
        self.join(content, parsed)
    }

    fn join(&self, content: &ProjectContent, parsed: ParsedContent) -> Project {
        let meta = self.metadata.get(&content.slug);
        let tech_stack = if parsed.tech_stack.is_empty() {
            meta.map(|m| m.tech.clone()).unwrap_or_default()
        } else {
            parsed.tech_stack
        };

        Project {
            slug: content.slug.clone(),
            title: content.frontmatter.title.clone(),
            description: content.frontmatter.description.clone(),
            link: content.frontmatter.link.clone(),
            image: content.frontmatter.image.clone(),
            date: meta.map(|m| m.date.clone()).unwrap_or_default(),
            color: meta.map(|m| m.color.clone()).unwrap_or_default(),
            problem: parsed.problem,
            solution: parsed.solution,
            features: parsed.features,
            impact: parsed.impact,
            tech_stack,
        }
    }

    /// All projects, newest first.
    pub async fn projects(&self) -> Vec<Project> {
        self.loader
            .load_all()
            .await
            .iter()
            .map(|content| self.assemble(content))
            .collect()
    }

    /// One project by slug.
    pub async fn project(&self, slug: &str) -> Option<Project> {
        let content = self.loader.find_by_slug(slug).await?;
        Some(self.assemble(&content))
    }

    /// Preview for one project. Requires both a document and a metadata
    /// entry.
    pub async fn preview(&self, slug: &str) -> Option<ProjectPreview> {
        let content = self.loader.find_by_slug(slug).await?;
        self.preview_of(&content)
    }

    /// Previews for every project that has metadata, newest first.
    pub async fn previews(&self) -> Vec<ProjectPreview> {
        self.loader
            .load_all()
            .await
            .iter()
            .filter_map(|content| self.preview_of(content))
            .collect()
    }

    fn preview_of(&self, content: &ProjectContent) -> Option<ProjectPreview> {
        let Some(meta) = self.metadata.get(&content.slug) else {
            log::debug!("no metadata for '{}'; no preview", content.slug);
            return None;
        };
        Some(ProjectPreview {
            slug: content.slug.clone(),
            title: content.frontmatter.short_title().to_string(),
            description: content.frontmatter.description.clone(),
            date: meta.date.clone(),
            tech: meta.tech.clone(),
            color: meta.color.clone(),
        })
    }
}
