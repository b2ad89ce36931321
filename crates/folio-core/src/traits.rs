//! Core traits for Folio.
//!
//! [`ConfigProvider`] abstracts where content lives so that the loader and
//! the CLI do not depend on a concrete configuration type.

use std::path::PathBuf;

use crate::Result;

/// Trait for application configuration.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use folio_core::traits::ConfigProvider;
/// use folio_core::Result;
///
/// #[derive(Clone)]
/// struct SiteConfig {
///     root: PathBuf,
/// }
///
/// impl ConfigProvider for SiteConfig {
///     fn project_name(&self) -> &str {
///         "portfolio"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.root.clone())
///     }
///
///     fn content_path(&self, content_type: &str) -> Result<PathBuf> {
///         Ok(self.root.join("content").join(content_type))
///     }
/// }
///
/// let config = SiteConfig { root: PathBuf::from("/site") };
/// assert_eq!(
///     config.content_path("projects").unwrap(),
///     PathBuf::from("/site/content/projects")
/// );
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Path for a specific content type, e.g. `"projects"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type is unknown or the path
    /// cannot be resolved.
    fn content_path(&self, content_type: &str) -> Result<PathBuf>;
}
