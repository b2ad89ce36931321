//! Path resolution utilities.

use std::path::{Path, PathBuf};

/// Expands `~` to the user's home directory.
///
/// If the path starts with `~`, replaces it with the user's home directory.
/// Otherwise returns the path unchanged.
///
/// # Example
///
/// ```
/// use folio_core::util::paths::expand_tilde;
///
/// let expanded = expand_tilde("~/portfolio");
/// assert!(!expanded.starts_with("~"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

/// Returns `<XDG config dir>/<app>/config.toml`, if the platform has one.
pub fn default_config_file(app: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(app).join("config.toml"))
}
