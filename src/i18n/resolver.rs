//! Dotted key resolution with language fallback.

use crate::input::{
    TranslationNode,
    TranslationTable,
    TranslationTree,
};

/// One step of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionStep {
    /// Dictionary of the active language.
    ActiveLanguage,
    /// Dictionary of the fallback language (`en`).
    FallbackLanguage,
    /// Non-empty literal supplied by the caller.
    Literal,
    /// The key itself.
    RawKey,
}

/// Steps tried in order; the first one yielding a value wins.
pub const RESOLUTION_ORDER: [ResolutionStep; 4] = [
    ResolutionStep::ActiveLanguage,
    ResolutionStep::FallbackLanguage,
    ResolutionStep::Literal,
    ResolutionStep::RawKey,
];

/// Resolves keys against one language of a [`TranslationTable`].
///
/// Missing keys are expected: resolution always produces a string.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    table: &'a TranslationTable,
    language: &'a str,
    separator: &'a str,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub const fn new(table: &'a TranslationTable, language: &'a str, separator: &'a str) -> Self {
        Self { table, language, separator }
    }

    #[must_use]
    pub const fn language(&self) -> &str {
        self.language
    }

    /// Resolves `key`, falling back to `en`, then `fallback`, then `key`.
    #[must_use]
    pub fn resolve(&self, key: &str, fallback: Option<&str>) -> String {
        self.resolve_with_source(key, fallback).0
    }

    /// Like [`Self::resolve`], also reporting which step produced the value.
    #[must_use]
    pub fn resolve_with_source(&self, key: &str, fallback: Option<&str>) -> (String, ResolutionStep) {
        for step in RESOLUTION_ORDER {
            if let Some(value) = self.try_step(step, key, fallback) {
                if matches!(step, ResolutionStep::Literal | ResolutionStep::RawKey) {
                    tracing::trace!(key, language = self.language, ?step, "Unresolved translation key");
                }
                return (value, step);
            }
        }
        (key.to_string(), ResolutionStep::RawKey)
    }

    /// Resolves `key` and fills `{{name}}` placeholders from `params`.
    #[must_use]
    pub fn resolve_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        interpolate(&self.resolve(key, None), params)
    }

    /// Whether the active or the fallback dictionary has a string for `key`.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        matches!(
            self.resolve_with_source(key, None).1,
            ResolutionStep::ActiveLanguage | ResolutionStep::FallbackLanguage
        )
    }

    fn try_step(&self, step: ResolutionStep, key: &str, fallback: Option<&str>) -> Option<String> {
        match step {
            ResolutionStep::ActiveLanguage => self.lookup(self.table.tree(self.language)?, key),
            ResolutionStep::FallbackLanguage => self.lookup(self.table.fallback_tree(), key),
            ResolutionStep::Literal => {
                fallback.filter(|literal| !literal.is_empty()).map(str::to_string)
            }
            ResolutionStep::RawKey => Some(key.to_string()),
        }
    }

    /// A terminal branch counts as a miss.
    fn lookup(&self, tree: &TranslationTree, key: &str) -> Option<String> {
        tree.walk(key.split(self.separator)).and_then(TranslationNode::as_leaf).map(str::to_string)
    }
}

/// Replaces `{{name}}` placeholders. Unknown placeholders are kept as is.
#[must_use]
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((before, after)) = rest.split_once("{{") {
        result.push_str(before);
        let Some((name, tail)) = after.split_once("}}") else {
            result.push_str("{{");
            rest = after;
            break;
        };
        match params.iter().find(|(param, _)| *param == name.trim()) {
            Some((_, value)) => result.push_str(value),
            None => {
                result.push_str("{{");
                result.push_str(name);
                result.push_str("}}");
            }
        }
        rest = tail;
    }

    result.push_str(rest);
    result
}
