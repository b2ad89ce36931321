//! Project document discovery and loading.
//!
//! One file per project lives in the content directory; its normalized file
//! stem is the project slug. The lenient entry points ([`ProjectLoader::load_all`],
//! [`ProjectLoader::find_by_slug`]) never fail: problems are logged and the
//! caller gets an empty list or `None`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_core::util::files::{self, FindOptions};
use folio_core::{Error, Result, slug_from_path, slugify};
use serde::Serialize;

use crate::frontmatter::{ProjectFrontmatter, parse_frontmatter};
use crate::metadata::MetadataTable;

/// A loaded project document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectContent {
    /// Normalized file stem.
    pub slug: String,
    /// Parsed header block.
    pub frontmatter: ProjectFrontmatter,
    /// Markdown body after the frontmatter.
    pub content: String,
    /// Source file.
    pub path: PathBuf,
}

/// Load one project file.
///
/// # Errors
///
/// Fails if the file cannot be read, has no usable stem, or its
/// frontmatter is malformed.
pub async fn load_file(path: &Path) -> Result<ProjectContent> {
    let slug = slug_from_path(path)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::invalid_data(format!("no file stem in {}", path.display())))?;
    let text = files::read_file(path).await?;
    let (frontmatter, body) = parse_frontmatter(&text)
        .map_err(|e| Error::parse(format!("{}: {e}", path.display())))?;

    Ok(ProjectContent {
        slug,
        frontmatter,
        content: body.to_string(),
        path: path.to_path_buf(),
    })
}

/// Order projects newest first by their metadata dates.
pub fn sort_newest_first(projects: &mut [ProjectContent], metadata: &MetadataTable) {
    projects.sort_by(|a, b| metadata.compare_newest_first(&a.slug, &b.slug));
}

/// Loads project documents from a directory.
#[derive(Clone, Debug)]
pub struct ProjectLoader {
    dir: PathBuf,
    options: FindOptions,
    metadata: Arc<MetadataTable>,
}

impl ProjectLoader {
    /// Loader for `dir`, matching `.mdx` and `.md` files directly inside it.
    pub fn new(dir: impl Into<PathBuf>, metadata: Arc<MetadataTable>) -> Self {
        Self {
            dir: dir.into(),
            options: FindOptions::markdown().with_max_depth(1),
            metadata,
        }
    }

    /// Replace the accepted file extensions.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = FindOptions::with_extensions(extensions).with_max_depth(1);
        self
    }

    /// The content directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The metadata table used for ordering.
    pub fn metadata(&self) -> &MetadataTable {
        &self.metadata
    }

    /// Shared handle to the metadata table.
    pub fn metadata_handle(&self) -> Arc<MetadataTable> {
        Arc::clone(&self.metadata)
    }

    /// Load every project, newest first, failing on the first problem.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the directory is missing; otherwise the first
    /// file error encountered.
    pub async fn try_load_all(&self) -> Result<Vec<ProjectContent>> {
        self.collect(true).await
    }

    /// Load every project, newest first.
    ///
    /// A missing directory is logged and yields an empty list; files that
    /// fail to load are logged and skipped.
    pub async fn load_all(&self) -> Vec<ProjectContent> {
        match self.collect(false).await {
            Ok(projects) => projects,
            Err(e) => {
                log::error!("Error loading projects from {}: {e}", self.dir.display());
                Vec::new()
            }
        }
    }

    /// Find a project by slug. The query is normalized like file stems are.
    pub async fn find_by_slug(&self, slug: &str) -> Option<ProjectContent> {
        let wanted = slugify(slug);
        let found = self.load_all().await.into_iter().find(|p| p.slug == wanted);
        if found.is_none() {
            log::debug!("no project with slug '{wanted}' in {}", self.dir.display());
        }
        found
    }

    async fn collect(&self, strict: bool) -> Result<Vec<ProjectContent>> {
        if !files::exists(&self.dir).await {
            return Err(Error::not_found(format!(
                "projects directory {}",
                self.dir.display()
            )));
        }

        let found = files::find_all_files(&self.dir, self.options.clone()).await?;
        let mut projects = Vec::with_capacity(found.len());
        for file in found {
            match load_file(&file.path).await {
                Ok(project) => projects.push(project),
                Err(e) if strict => return Err(e),
                Err(e) => log::warn!("skipping {}: {e}", file.path.display()),
            }
        }

        sort_newest_first(&mut projects, &self.metadata);
        log::debug!("loaded {} project(s) from {}", projects.len(), self.dir.display());
        Ok(projects)
    }
}
