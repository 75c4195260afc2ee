use std::path::PathBuf;
use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::location::{
    OvernightPolicy,
    StatusOptions,
};
use crate::types::TextDirection;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languages[0].code")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortalSettings {
    /// Language used when nothing valid is persisted.
    pub default_language: String,

    pub key_separator: String,

    /// Languages rendered right-to-left.
    ///
    /// `ar` is listed although no Arabic dictionary ships; it only takes
    /// effect once one is added.
    pub rtl_languages: Vec<String>,

    /// Storage key holding the persisted language code.
    pub storage_key: String,

    /// Simulated latency of a language switch, for UI transition feedback.
    pub change_latency_ms: u64,

    pub default_currency: String,

    /// Directory with translation files. Bundled dictionaries when unset.
    pub translations_dir: Option<PathBuf>,
    pub translation_files: TranslationFilesConfig,

    /// Display names for the language picker.
    pub languages: Vec<LanguageEntry>,

    pub location: LocationSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    pub file_pattern: String,
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "**/*.json".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageEntry {
    pub code: String,
    pub name: String,
    pub native_name: String,
}

impl LanguageEntry {
    fn new(code: &str, name: &str, native_name: &str) -> Self {
        Self { code: code.to_string(), name: name.to_string(), native_name: native_name.to_string() }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationSettings {
    /// Close locations on holidays marked closed.
    pub honor_holidays: bool,
    pub overnight_hours: OvernightPolicy,
}

impl LocationSettings {
    #[must_use]
    pub const fn status_options(self) -> StatusOptions {
        StatusOptions { honor_holidays: self.honor_holidays, overnight: self.overnight_hours }
    }
}

impl PortalSettings {
    #[must_use]
    pub const fn change_latency(&self) -> Duration {
        Duration::from_millis(self.change_latency_ms)
    }

    #[must_use]
    pub fn direction_for(&self, code: &str) -> TextDirection {
        let primary = code.split(['-', '_']).next().unwrap_or(code);
        if self.rtl_languages.iter().any(|rtl| rtl == code || rtl == primary) {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }

    #[must_use]
    pub fn language_entry(&self, code: &str) -> Option<&LanguageEntry> {
        self.languages.iter().find(|entry| entry.code == code)
    }

    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Invalid currency code
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.default_language.is_empty() {
            errors.push(ValidationError::new(
                "defaultLanguage",
                "The default language cannot be empty. Example: \"en\"",
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.storage_key.trim().is_empty() {
            errors.push(ValidationError::new(
                "storageKey",
                "The storage key cannot be empty. Example: \"language\"",
            ));
        }

        if !is_currency_code(&self.default_currency) {
            errors.push(ValidationError::new(
                "defaultCurrency",
                format!(
                    "Invalid currency code '{}'. Use a three letter ISO 4217 code such as \"INR\"",
                    self.default_currency
                ),
            ));
        }

        if self.translation_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                "The pattern cannot be empty. Example: \"**/*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.translation_files.file_pattern) {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.translation_files.file_pattern),
            ));
        }

        for (index, rtl) in self.rtl_languages.iter().enumerate() {
            if rtl.is_empty() {
                errors.push(ValidationError::new(
                    format!("rtlLanguages[{index}]"),
                    "Language code cannot be empty",
                ));
            }
        }

        for (index, entry) in self.languages.iter().enumerate() {
            if entry.code.is_empty() {
                errors.push(ValidationError::new(
                    format!("languages[{index}].code"),
                    "Language code cannot be empty",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            key_separator: ".".to_string(),
            rtl_languages: vec!["ur".to_string(), "ar".to_string()],
            storage_key: "language".to_string(),
            change_latency_ms: 300,
            default_currency: "INR".to_string(),
            translations_dir: None,
            translation_files: TranslationFilesConfig::default(),
            languages: vec![
                LanguageEntry::new("en", "English", "English"),
                LanguageEntry::new("hi", "Hindi", "हिन्दी"),
                LanguageEntry::new("ur", "Urdu", "اردو"),
            ],
            location: LocationSettings::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = PortalSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"changeLatencyMs": 0, "location": {"honorHolidays": true}}"#;

        let settings: PortalSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.key_separator, eq("."));
        assert_that!(settings.change_latency_ms, eq(0));
        assert_that!(settings.location.honor_holidays, eq(true));
        assert_that!(settings.location.overnight_hours, eq(OvernightPolicy::Wrap));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: PortalSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings.default_language, eq("en"));
        assert_that!(settings.rtl_languages, elements_are![eq("ur"), eq("ar")]);
        assert_that!(settings.storage_key, eq("language"));
        assert_that!(settings.default_currency, eq("INR"));
        assert_that!(settings.translation_files.file_pattern, eq("**/*.json"));
        assert_that!(settings.languages, len(eq(3)));
    }

    #[rstest]
    #[case::urdu("ur", TextDirection::Rtl)]
    #[case::urdu_region("ur-PK", TextDirection::Rtl)]
    #[case::arabic("ar", TextDirection::Rtl)]
    #[case::hindi("hi", TextDirection::Ltr)]
    #[case::english("en", TextDirection::Ltr)]
    fn direction_for_language(#[case] code: &str, #[case] expected: TextDirection) {
        assert_that!(PortalSettings::default().direction_for(code), eq(expected));
    }

    #[rstest]
    fn validate_invalid_key_separator_empty() {
        let settings = PortalSettings { key_separator: String::new(), ..PortalSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("keySeparator")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    #[case("inr")]
    #[case("RUPEE")]
    #[case("")]
    fn validate_invalid_currency(#[case] currency: &str) {
        let settings =
            PortalSettings { default_currency: currency.to_string(), ..PortalSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("defaultCurrency")),
                field!(ValidationError.message, contains_substring("Invalid currency code"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_translation_file_pattern() {
        let settings = PortalSettings {
            translation_files: TranslationFilesConfig { file_pattern: "**/{en,hi.json".to_string() },
            ..PortalSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("translationFiles.filePattern")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_empty_language_entry_code() {
        let settings = PortalSettings {
            languages: vec![LanguageEntry::new("", "Nameless", "Nameless")],
            ..PortalSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.field_path, eq("languages[0].code"))])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = PortalSettings {
            key_separator: String::new(),
            storage_key: " ".to_string(),
            ..PortalSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. keySeparator"));
        assert_that!(error_message, contains_substring("2. storageKey"));
    }
}
