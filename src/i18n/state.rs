//! Active language state shared by the UI.
//!
//! [`LanguageStore`] owns the current language, the loading flag and the
//! document attributes derived from them (`lang`, `dir`). It is created once
//! by the application and handed to consumers behind an `Arc`.

use std::sync::atomic::{
    AtomicU64,
    Ordering,
};
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
    RwLockReadGuard,
    RwLockWriteGuard,
};

use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use super::LanguageError;
use super::events::{
    LanguageBus,
    LanguageChanged,
};
use super::format::Formatter;
use super::resolver::Resolver;
use super::storage::KeyValueStore;
use crate::config::PortalSettings;
use crate::input::TranslationTable;
use crate::types::{
    LanguageCode,
    TextDirection,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageState {
    pub current_language: LanguageCode,
    pub is_loading: bool,
}

/// Document-level attributes following the active language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentAttributes {
    pub lang: LanguageCode,
    pub dir: TextDirection,
}

/// Entry of the language picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub code: LanguageCode,
    pub name: String,
    pub native_name: String,
    pub direction: TextDirection,
}

/// Result of an accepted language change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    Applied,
    /// A newer change started before this one completed.
    Superseded,
}

/// Owner of the active language.
///
/// # Concurrency
///
/// Overlapping [`Self::change_language`] calls resolve last-write-wins: every
/// call takes a new generation and only the newest generation is applied.
#[derive(Debug)]
pub struct LanguageStore {
    table: Arc<TranslationTable>,
    storage: Arc<dyn KeyValueStore>,
    bus: LanguageBus,
    settings: PortalSettings,
    current: RwLock<Current>,
    generation: AtomicU64,
}

/// State and document attributes, updated together.
#[derive(Debug)]
struct Current {
    state: LanguageState,
    document: DocumentAttributes,
}

/// Clears the loading flag when a change ends or is dropped, unless a newer
/// change took over meanwhile.
struct LoadingGuard<'a> {
    store: &'a LanguageStore,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut current = write(&self.store.current);
        if self.store.generation.load(Ordering::SeqCst) == self.generation {
            current.state.is_loading = false;
        }
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl LanguageStore {
    /// Creates the store from the persisted language.
    ///
    /// A persisted code missing from `table`, or a failing read, falls back
    /// to the configured default language (`en`).
    pub fn initialize(
        table: Arc<TranslationTable>,
        storage: Arc<dyn KeyValueStore>,
        bus: LanguageBus,
        settings: PortalSettings,
    ) -> Self {
        let language = Self::initial_language(&table, storage.as_ref(), &settings);
        let dir = settings.direction_for(language.as_str());
        tracing::debug!(%language, %dir, "Language store initialized");

        Self {
            table,
            storage,
            bus,
            current: RwLock::new(Current {
                state: LanguageState { current_language: language.clone(), is_loading: false },
                document: DocumentAttributes { lang: language, dir },
            }),
            settings,
            generation: AtomicU64::new(0),
        }
    }

    fn initial_language(
        table: &TranslationTable,
        storage: &dyn KeyValueStore,
        settings: &PortalSettings,
    ) -> LanguageCode {
        let default_language = if table.contains(&settings.default_language) {
            LanguageCode::from(settings.default_language.as_str())
        } else {
            table.fallback().clone()
        };

        match storage.get(&settings.storage_key) {
            Ok(Some(code)) if table.contains(&code) => LanguageCode::from(code),
            Ok(Some(code)) => {
                tracing::warn!(code = %code, "Ignoring persisted language without translations");
                default_language
            }
            Ok(None) => default_language,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted language");
                default_language
            }
        }
    }

    /// Switches the active language.
    ///
    /// An unsupported `code` is rejected without touching any state.
    /// Persistence failures are logged; the in-memory switch still happens.
    pub async fn change_language(&self, code: &str) -> Result<ChangeOutcome, LanguageError> {
        if !self.table.contains(code) {
            tracing::warn!(code, "Rejected unsupported language");
            return Err(LanguageError::InvalidLanguage(code.to_string()));
        }

        let generation = {
            let mut current = write(&self.current);
            current.state.is_loading = true;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        let _loading = LoadingGuard { store: self, generation };
        tracing::debug!(code, generation, "Changing language");

        let latency = self.settings.change_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(code, generation, "Language change superseded");
            return Ok(ChangeOutcome::Superseded);
        }

        let language = LanguageCode::from(code);
        if let Err(e) = self.storage.set(&self.settings.storage_key, language.as_str()) {
            tracing::warn!(error = %e, %language, "Failed to persist language");
        }
        self.apply(&language, generation);
        self.bus.publish(LanguageChanged { language });

        Ok(ChangeOutcome::Applied)
    }

    /// Applies a language announced by another component.
    ///
    /// Nothing is persisted or re-published. Returns whether the state changed.
    pub fn sync_from(&self, event: &LanguageChanged) -> bool {
        let code = event.language.as_str();
        if !self.table.contains(code) {
            tracing::warn!(code, "Ignoring broadcast of unsupported language");
            return false;
        }
        if read(&self.current).state.current_language == event.language {
            return false;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply(&event.language, generation);
        tracing::debug!(code, "Language synchronized from broadcast");
        true
    }

    /// Follows the bus until it closes. Events published by this store are
    /// ignored as they already match the current language.
    pub fn spawn_sync(self: &Arc<Self>) -> JoinHandle<()> {
        let store = Arc::clone(self);
        let mut receiver = self.bus.subscribe();

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        store.sync_from(&event);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "Language sync lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    fn apply(&self, language: &LanguageCode, generation: u64) {
        let dir = self.settings.direction_for(language.as_str());

        let mut current = write(&self.current);
        current.document = DocumentAttributes { lang: language.clone(), dir };
        current.state.current_language = language.clone();
        current.state.is_loading = self.generation.load(Ordering::SeqCst) != generation;
    }

    #[must_use]
    pub fn current_language(&self) -> LanguageCode {
        read(&self.current).state.current_language.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        read(&self.current).state.is_loading
    }

    #[must_use]
    pub fn state(&self) -> LanguageState {
        read(&self.current).state.clone()
    }

    #[must_use]
    pub fn document(&self) -> DocumentAttributes {
        read(&self.current).document.clone()
    }

    /// State and document attributes read together.
    #[must_use]
    pub fn snapshot(&self) -> (LanguageState, DocumentAttributes) {
        let current = read(&self.current);
        (current.state.clone(), current.document.clone())
    }

    #[must_use]
    pub const fn table(&self) -> &Arc<TranslationTable> {
        &self.table
    }

    #[must_use]
    pub const fn settings(&self) -> &PortalSettings {
        &self.settings
    }

    #[must_use]
    pub const fn bus(&self) -> &LanguageBus {
        &self.bus
    }

    /// Snapshot bound to the current language, for rendering.
    #[must_use]
    pub fn translator(&self) -> Translator {
        let language = self.current_language();
        Translator {
            table: Arc::clone(&self.table),
            direction: self.settings.direction_for(language.as_str()),
            separator: self.settings.key_separator.clone(),
            language,
        }
    }

    /// Resolves `key` in the current language.
    #[must_use]
    pub fn translate(&self, key: &str, fallback: Option<&str>) -> String {
        let language = self.current_language();
        Resolver::new(&self.table, language.as_str(), &self.settings.key_separator)
            .resolve(key, fallback)
    }

    #[must_use]
    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.current_language())
    }

    /// Languages with a dictionary, named from the settings catalogue.
    #[must_use]
    pub fn available_languages(&self) -> Vec<LanguageInfo> {
        self.table
            .languages()
            .into_iter()
            .map(|code| {
                let entry = self.settings.language_entry(code.as_str());
                LanguageInfo {
                    code: code.clone(),
                    name: entry.map_or_else(|| code.to_string(), |e| e.name.clone()),
                    native_name: entry.map_or_else(|| code.to_string(), |e| e.native_name.clone()),
                    direction: self.settings.direction_for(code.as_str()),
                }
            })
            .collect()
    }
}

/// Language-bound view handed to rendering code.
#[derive(Debug, Clone)]
pub struct Translator {
    table: Arc<TranslationTable>,
    language: LanguageCode,
    separator: String,
    direction: TextDirection,
}

impl Translator {
    #[must_use]
    pub const fn language(&self) -> &LanguageCode {
        &self.language
    }

    #[must_use]
    pub const fn direction(&self) -> TextDirection {
        self.direction
    }

    #[must_use]
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.table, self.language.as_str(), &self.separator)
    }

    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.resolver().resolve(key, None)
    }

    /// Resolves `key`, using `fallback` when no dictionary has it.
    #[must_use]
    pub fn t_or(&self, key: &str, fallback: &str) -> String {
        self.resolver().resolve(key, Some(fallback))
    }

    #[must_use]
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.resolver().resolve_with(key, params)
    }

    #[must_use]
    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.language.clone())
    }
}
