//! Reads `.portal-i18n.json` from a workspace.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    PortalSettings,
    ValidationError,
};

pub(super) const CONFIG_FILE_NAME: &str = ".portal-i18n.json";

/// Settings read from a workspace config file.
#[derive(Debug)]
pub(super) struct LoadedConfig {
    pub path: PathBuf,
    pub settings: PortalSettings,
}

/// Reads the workspace config file, `Ok(None)` when there is none.
///
/// A relative `translationsDir` is joined onto `workspace_root` and must
/// name an existing directory.
pub(super) fn load_from_workspace(workspace_root: &Path) -> Result<Option<LoadedConfig>, ConfigError> {
    let path = workspace_root.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "No workspace config");
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    let mut settings: PortalSettings = serde_json::from_str(&content)?;

    if let Some(dir) = settings.translations_dir.take() {
        let dir = if dir.is_relative() { workspace_root.join(dir) } else { dir };
        if !dir.is_dir() {
            return Err(ConfigError::ValidationErrors(vec![ValidationError::new(
                "translationsDir",
                format!("'{}' is not a directory", dir.display()),
            )]));
        }
        settings.translations_dir = Some(dir);
    }

    tracing::debug!(path = %path.display(), "Loaded workspace config");
    Ok(Some(LoadedConfig { path, settings }))
}
