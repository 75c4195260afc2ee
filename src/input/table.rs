//! Language code → translation tree mapping.

use std::collections::{
    BTreeSet,
    HashMap,
};

use serde_json::Value;

use super::TranslationError;
use super::translation::TranslationTree;
use crate::types::LanguageCode;

/// Dictionaries bundled with the portal.
const BUILTIN_LOCALES: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.json")),
    ("hi", include_str!("../../locales/hi.json")),
    ("ur", include_str!("../../locales/ur.json")),
];

/// All dictionaries known to the application.
///
/// Loaded once and immutable afterwards. The fallback language always has a
/// tree; other languages may be partially populated.
#[derive(Debug, Clone)]
pub struct TranslationTable {
    languages: HashMap<LanguageCode, TranslationTree>,
    fallback: LanguageCode,
}

impl TranslationTable {
    /// # Errors
    /// `MissingFallback` when `languages` has no tree for `fallback`.
    pub fn new(
        languages: HashMap<LanguageCode, TranslationTree>,
        fallback: LanguageCode,
    ) -> Result<Self, TranslationError> {
        if !languages.contains_key(&fallback) {
            return Err(TranslationError::MissingFallback(fallback.to_string()));
        }
        Ok(Self { languages, fallback })
    }

    /// Table with `en` as the fallback language.
    pub fn with_english_fallback(
        languages: HashMap<LanguageCode, TranslationTree>,
    ) -> Result<Self, TranslationError> {
        Self::new(languages, LanguageCode::english())
    }

    /// The `en`, `hi` and `ur` dictionaries shipped with the crate.
    pub fn builtin() -> Result<Self, TranslationError> {
        let mut languages = HashMap::new();
        for (code, source) in BUILTIN_LOCALES {
            let json: Value = serde_json::from_str(source).map_err(|source| {
                TranslationError::Parse { path: format!("locales/{code}.json").into(), source }
            })?;
            languages.insert(LanguageCode::from(*code), TranslationTree::from_json(&json)?);
        }
        Self::with_english_fallback(languages)
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    #[must_use]
    pub fn tree(&self, code: &str) -> Option<&TranslationTree> {
        self.languages.get(code)
    }

    #[must_use]
    pub const fn fallback(&self) -> &LanguageCode {
        &self.fallback
    }

    #[must_use]
    pub fn fallback_tree(&self) -> &TranslationTree {
        // Checked in `new`, an empty tree only if that invariant were broken.
        static EMPTY: TranslationTree = TranslationTree::empty();
        self.languages.get(&self.fallback).unwrap_or(&EMPTY)
    }

    /// Language codes sorted alphabetically.
    #[must_use]
    pub fn languages(&self) -> Vec<&LanguageCode> {
        let mut codes: Vec<_> = self.languages.keys().collect();
        codes.sort();
        codes
    }

    /// Keys present in the fallback dictionary but absent for `code`.
    ///
    /// Every fallback key is missing for a language the table does not know.
    #[must_use]
    pub fn missing_keys(&self, code: &str, separator: &str) -> Vec<String> {
        let reference = self.fallback_tree().flatten(separator);
        let available: BTreeSet<String> = self
            .tree(code)
            .map(|tree| tree.flatten(separator).into_keys().collect())
            .unwrap_or_default();

        let mut missing: Vec<String> =
            reference.into_keys().filter(|key| !available.contains(key)).collect();
        missing.sort();
        missing
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;

    fn tree(value: &Value) -> TranslationTree {
        TranslationTree::from_json(value).unwrap()
    }

    #[googletest::test]
    fn new_requires_fallback_tree() {
        let mut languages = HashMap::new();
        languages.insert(LanguageCode::from("hi"), tree(&json!({ "a": "b" })));

        let result = TranslationTable::with_english_fallback(languages);

        assert!(matches!(result, Err(TranslationError::MissingFallback(code)) if code == "en"));
    }

    #[googletest::test]
    fn builtin_contains_bundled_languages() {
        let table = TranslationTable::builtin().unwrap();

        let codes: Vec<&str> = table.languages().into_iter().map(LanguageCode::as_str).collect();
        expect_that!(codes, elements_are![eq(&"en"), eq(&"hi"), eq(&"ur")]);
        expect_that!(table.fallback().as_str(), eq("en"));
        expect_that!(table.contains("xx"), eq(false));
    }

    #[googletest::test]
    fn missing_keys_lists_untranslated_entries() {
        let mut languages = HashMap::new();
        languages.insert(
            LanguageCode::english(),
            tree(&json!({ "nav": { "home": "Home", "events": "Events" }, "title": "Portal" })),
        );
        languages.insert(LanguageCode::from("hi"), tree(&json!({ "nav": { "home": "होम" } })));
        let table = TranslationTable::with_english_fallback(languages).unwrap();

        expect_that!(
            table.missing_keys("hi", "."),
            elements_are![eq("nav.events"), eq("title")]
        );
        expect_that!(table.missing_keys("en", "."), is_empty());
        expect_that!(table.missing_keys("xx", "."), len(eq(3)));
    }
}
