//! Helpers shared by the unit test modules.
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use crate::config::PortalSettings;
use crate::i18n::{
    KeyValueStore,
    LanguageBus,
    LanguageStore,
    StorageError,
};
use crate::input::TranslationTable;

/// Storage that rejects every call, like a browser in private mode.
#[derive(Debug)]
pub(crate) struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("read blocked".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("write blocked".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("write blocked".to_string()))
    }
}

/// Settings with no language change latency.
pub(crate) fn instant_settings() -> PortalSettings {
    PortalSettings { change_latency_ms: 0, ..PortalSettings::default() }
}

/// [`LanguageStore`] over the bundled dictionaries.
pub(crate) fn create_store(
    storage: Arc<dyn KeyValueStore>,
    settings: PortalSettings,
) -> LanguageStore {
    let table = Arc::new(TranslationTable::builtin().unwrap());
    LanguageStore::initialize(table, storage, LanguageBus::default(), settings)
}
