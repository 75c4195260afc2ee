//! Validated settings for one workspace.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    PortalSettings,
    loader,
};

/// Settings of a workspace and the file they came from.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    settings: PortalSettings,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// Loads `.portal-i18n.json` from `workspace`, falling back to the
    /// defaults when there is no workspace or no config file.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the file cannot be read, is not valid
    /// JSON or fails validation.
    pub fn load(workspace: Option<&Path>) -> Result<Self, ConfigError> {
        let loaded = match workspace {
            Some(root) => loader::load_from_workspace(root)?,
            None => None,
        };
        let (settings, source) = match loaded {
            Some(loaded) => (loaded.settings, Some(loaded.path)),
            None => (PortalSettings::default(), None),
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;
        tracing::debug!(source = ?source, "Settings ready");

        Ok(Self { settings, source })
    }

    #[must_use]
    pub const fn settings(&self) -> &PortalSettings {
        &self.settings
    }

    #[must_use]
    pub fn into_settings(self) -> PortalSettings {
        self.settings
    }

    /// Config file the settings were read from, `None` for the defaults.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::loader::CONFIG_FILE_NAME;

    #[rstest]
    fn defaults_without_workspace() {
        let manager = ConfigManager::load(None).unwrap();

        assert_eq!(manager.settings().default_language, "en");
        assert!(manager.source().is_none());
    }

    #[rstest]
    fn reads_workspace_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"rtlLanguages": ["ur"]}"#).unwrap();

        let manager = ConfigManager::load(Some(temp_dir.path())).unwrap();

        assert_eq!(manager.settings().rtl_languages, vec!["ur".to_string()]);
        assert_eq!(manager.source(), Some(path.as_path()));
    }

    #[rstest]
    fn defaults_when_workspace_has_no_config() {
        let temp_dir = TempDir::new().unwrap();

        let settings = ConfigManager::load(Some(temp_dir.path())).unwrap().into_settings();

        assert_eq!(settings.storage_key, "language");
    }

    #[rstest]
    fn invalid_config_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"defaultCurrency": "rs"}"#).unwrap();

        let result = ConfigManager::load(Some(temp_dir.path()));

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
    }
}
