//! Translation dictionary loading.

pub mod discovery;
pub mod table;
pub mod translation;

use std::path::PathBuf;

use thiserror::Error;

pub use table::TranslationTable;
pub use translation::{
    TranslationNode,
    TranslationTree,
};

/// Errors raised while building translation tables.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The fallback language has no dictionary
    #[error("Fallback language '{0}' has no translation tree")]
    MissingFallback(String),
    /// A translation document whose root is not an object
    #[error("Translation root must be a JSON object")]
    InvalidRoot,
    /// No known language code in the file path
    #[error("Cannot detect language from path: {}", .0.display())]
    UnknownLanguage(PathBuf),
    #[error("Failed to read translation file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse translation file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid translation file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
