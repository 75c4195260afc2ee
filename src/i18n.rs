//! Language state, key resolution and locale formatting.

pub mod events;
pub mod format;
pub mod resolver;
pub mod state;
pub mod storage;

use thiserror::Error;

pub use events::{
    LanguageBus,
    LanguageChanged,
};
pub use format::Formatter;
pub use resolver::{
    ResolutionStep,
    Resolver,
    interpolate,
};
pub use state::{
    ChangeOutcome,
    DocumentAttributes,
    LanguageInfo,
    LanguageState,
    LanguageStore,
    Translator,
};
pub use storage::{
    JsonFileStore,
    KeyValueStore,
    MemoryStore,
    StorageError,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    /// The requested language has no dictionary
    #[error("Unsupported language '{0}'")]
    InvalidLanguage(String),
}
