//! Configuration for the Folio CLI.
//!
//! Provides the [`FolioConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `FOLIO_CONFIG` environment variable
//! 3. XDG default: `~/.config/folio/config.toml`
//! 4. Built-in defaults

use confyg::{Confygery, env};
use folio_content::{ContentExtractor, ExtractOptions, MetadataTable};
use folio_core::traits::ConfigProvider;
use folio_core::util::paths::{default_config_file, expand_tilde};
use folio_core::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::path::PathBuf;

/// Content type key for project documents.
pub const PROJECTS: &str = "projects";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Folio CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Base path for the site checkout.
    pub base_path: Option<String>,

    /// Content-related configuration.
    pub content: ContentConfig,

    /// Extraction tunables.
    pub extract: ExtractOptions,

    /// Metadata table configuration.
    pub metadata: MetadataConfig,
}

/// Content storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Path to the projects directory. Defaults to
    /// `<base_path>/content/projects`.
    pub path: Option<String>,

    /// Accepted file extensions.
    #[serde(deserialize_with = "string_list")]
    pub extensions: Vec<String>,
}

/// Metadata table configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// TOML file with `[slug]` entries. The built-in table is used when unset.
    pub path: Option<String>,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            project_name: "folio".to_string(),
            base_path: None,
            content: ContentConfig::default(),
            extract: ExtractOptions::default(),
            metadata: MetadataConfig::default(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: None,
            extensions: vec!["mdx".to_string(), "md".to_string()],
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl FolioConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("FOLIO");
        env_opts.add_section("content");
        env_opts.add_section("extract");
        env_opts.add_section("metadata");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("FOLIO_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        default_config_file("folio")
    }

    /// The metadata table: the configured file, or the built-in table.
    pub async fn metadata_table(&self) -> Result<MetadataTable> {
        match &self.metadata.path {
            Some(path) => MetadataTable::load(&expand_tilde(path)).await,
            None => Ok(MetadataTable::builtin()),
        }
    }

    /// An extractor with the configured options.
    pub fn extractor(&self) -> ContentExtractor {
        ContentExtractor::new(self.extract.clone())
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `FOLIO_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, "FOLIO", &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for FolioConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(expand_tilde(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn content_path(&self, content_type: &str) -> Result<PathBuf> {
        match (content_type, &self.content.path) {
            (PROJECTS, Some(p)) => Ok(expand_tilde(p)),
            (PROJECTS, None) => Ok(self.base_path()?.join("content").join(PROJECTS)),
            (other, _) => Err(Error::config(format!("Unknown content type: {other}"))),
        }
    }
}

// ============================================================================
// Helper: string-or-list fields
// ============================================================================

/// Accepts a list, a comma-separated string (`mdx,md`), or the JSON array
/// form written by [`FolioConfig::to_env_vars`].
fn string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::List(items) => Ok(items),
        Raw::Text(s) if s.trim_start().starts_with('[') => {
            serde_json::from_str(&s).map_err(|e| de::Error::custom(format!("invalid list '{s}': {e}")))
        }
        Raw::Text(s) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()),
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Serialises tests that set `FOLIO_*` variables or assert on values
    /// those variables could override.
    pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// RAII guard for env var manipulation in tests.
    pub(crate) struct EnvGuard {
        key: String,
        prev: Option<String>,
    }

    impl EnvGuard {
        pub(crate) fn new(key: &str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: tests touching an env var hold the guard for its duration.
            unsafe { std::env::set_var(key, value) };
            Self {
                key: key.to_string(),
                prev,
            }
        }

        pub(crate) fn remove(key: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: see `new`.
            unsafe { std::env::remove_var(key) };
            Self {
                key: key.to_string(),
                prev,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: see `new`.
            unsafe {
                match &self.prev {
                    Some(val) => std::env::set_var(&self.key, val),
                    None => std::env::remove_var(&self.key),
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Default tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_folio_config_default() {
        let config = FolioConfig::default();
        assert_eq!(config.project_name, "folio");
        assert!(config.base_path.is_none());
        assert!(config.content.path.is_none());
        assert_eq!(config.content.extensions, vec!["mdx", "md"]);
        assert_eq!(config.extract.min_sentence_len, 20);
        assert!(config.metadata.path.is_none());
    }

    // ------------------------------------------------------------------------
    // Serialization tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_folio_config_from_toml() {
        let toml_str = r#"
            project_name = "portfolio"
            base_path = "/site"

            [content]
            path = "/site/projects"
            extensions = ["mdx"]

            [extract]
            min_sentence_len = 10

            [metadata]
            path = "/site/metadata.toml"
        "#;

        let config: FolioConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.project_name, "portfolio");
        assert_eq!(config.base_path.as_deref(), Some("/site"));
        assert_eq!(config.content.path.as_deref(), Some("/site/projects"));
        assert_eq!(config.content.extensions, vec!["mdx"]);
        assert_eq!(config.extract.min_sentence_len, 10);
        assert_eq!(config.metadata.path.as_deref(), Some("/site/metadata.toml"));
    }

    #[test]
    fn test_folio_config_partial_toml_keeps_defaults() {
        let config: FolioConfig = toml::from_str("[extract]\nmin_sentence_len = 5\n").unwrap();
        assert_eq!(config.project_name, "folio");
        assert_eq!(config.content.extensions, vec!["mdx", "md"]);
        assert_eq!(config.extract.min_sentence_len, 5);
    }

    #[test]
    fn test_folio_config_to_toml() {
        let config = FolioConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("project_name = \"folio\""));
        assert!(toml_str.contains("[extract]"));
        assert!(toml_str.contains("min_sentence_len = 20"));

        let parsed: FolioConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.project_name, config.project_name);
        assert_eq!(parsed.extract, config.extract);
    }

    // ------------------------------------------------------------------------
    // Loading tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_folio_config_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                project_name = "loaded"
                [content]
                path = "/loaded/projects"
            "#,
        )
        .unwrap();

        let config = FolioConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.project_name, "loaded");
        assert_eq!(config.content.path.as_deref(), Some("/loaded/projects"));
    }

    #[test]
    fn test_folio_config_load_defaults() {
        let _lock = env_lock();
        let config = FolioConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.project_name, "folio");
        assert_eq!(config.extract.min_sentence_len, 20);
    }

    #[test]
    fn test_folio_config_load_env_overlay() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [metadata]
                path = "/from/file.toml"
            "#,
        )
        .unwrap();

        let _lock = env_lock();
        let _guard = EnvGuard::new("FOLIO_METADATA_PATH", "/from/env.toml");
        let config = FolioConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.metadata.path.as_deref(), Some("/from/env.toml"));
    }

    #[test]
    fn test_folio_config_load_env_numeric_overlay() {
        let _lock = env_lock();
        let _guard = EnvGuard::new("FOLIO_EXTRACT_MIN_SENTENCE_LEN", "5");
        let config = FolioConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.extract.min_sentence_len, 5);
    }

    #[test]
    fn test_folio_config_load_env_extensions_overlay() {
        let _lock = env_lock();
        let _guard = EnvGuard::new("FOLIO_CONTENT_EXTENSIONS", "mdx, markdown");
        let config = FolioConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.content.extensions, vec!["mdx", "markdown"]);
    }

    #[test]
    fn test_content_extensions_accept_string_forms() {
        let listed: ContentConfig = toml::from_str("extensions = [\"mdx\"]").unwrap();
        let comma: ContentConfig = toml::from_str("extensions = \"mdx,md\"").unwrap();
        let json: ContentConfig = toml::from_str("extensions = '[\"mdx\",\"md\"]'").unwrap();
        assert_eq!(listed.extensions, vec!["mdx"]);
        assert_eq!(comma.extensions, vec!["mdx", "md"]);
        assert_eq!(json.extensions, vec!["mdx", "md"]);
    }

    // ------------------------------------------------------------------------
    // resolve_config_path tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = FolioConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_env() {
        let _lock = env_lock();
        let _guard = EnvGuard::new("FOLIO_CONFIG", "/env/config.toml");
        let path = FolioConfig::resolve_config_path(None);
        assert_eq!(path, Some(PathBuf::from("/env/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_default() {
        let _lock = env_lock();
        let _guard = EnvGuard::remove("FOLIO_CONFIG");
        if let Some(p) = FolioConfig::resolve_config_path(None) {
            assert!(p.ends_with("folio/config.toml"));
        }
    }

    // ------------------------------------------------------------------------
    // ConfigProvider tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_provider_base_path() {
        let config = FolioConfig {
            base_path: Some("/my/site".into()),
            ..Default::default()
        };
        assert_eq!(config.project_name(), "folio");
        assert_eq!(config.base_path().unwrap(), PathBuf::from("/my/site"));
    }

    #[test]
    fn test_provider_base_path_default() {
        let config = FolioConfig::default();
        assert_eq!(config.base_path().unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_provider_content_path_default() {
        let config = FolioConfig {
            base_path: Some("/site".into()),
            ..Default::default()
        };
        assert_eq!(
            config.content_path(PROJECTS).unwrap(),
            PathBuf::from("/site/content/projects")
        );
    }

    #[test]
    fn test_provider_content_path_explicit() {
        let config = FolioConfig {
            content: ContentConfig {
                path: Some("/custom/projects".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.content_path(PROJECTS).unwrap(),
            PathBuf::from("/custom/projects")
        );
    }

    #[test]
    fn test_provider_unknown_content_type() {
        assert!(FolioConfig::default().content_path("posts").is_err());
    }

    // ------------------------------------------------------------------------
    // Metadata and extractor
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_metadata_table_builtin() {
        let table = FolioConfig::default().metadata_table().await.unwrap();
        assert_eq!(table, MetadataTable::builtin());
    }

    #[tokio::test]
    async fn test_metadata_table_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("metadata.toml");
        std::fs::write(&path, "[side]\ndate = \"Jan 2026\"\n").unwrap();

        let config = FolioConfig {
            metadata: MetadataConfig {
                path: Some(path.to_string_lossy().into_owned()),
            },
            ..Default::default()
        };
        let table = config.metadata_table().await.unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.contains("side"));
    }

    #[test]
    fn test_extractor_uses_options() {
        let config = FolioConfig {
            extract: ExtractOptions { min_sentence_len: 3 },
            ..Default::default()
        };
        assert_eq!(config.extractor().options().min_sentence_len, 3);
    }

    // ------------------------------------------------------------------------
    // to_env_vars tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_folio_config_to_env_vars() {
        let vars = FolioConfig::default().to_env_vars().unwrap();
        let map: HashMap<_, _> = vars.into_iter().collect();
        assert_eq!(map.get("FOLIO_PROJECT_NAME").unwrap(), "folio");
        assert_eq!(map.get("FOLIO_EXTRACT_MIN_SENTENCE_LEN").unwrap(), "20");
        assert_eq!(map.get("FOLIO_CONTENT_EXTENSIONS").unwrap(), "[\"mdx\",\"md\"]");
    }

    #[test]
    fn test_folio_config_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FolioConfig>();
    }
}
