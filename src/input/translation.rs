//! Translation dictionary input definitions

use std::collections::{
    BTreeMap,
    HashMap,
    HashSet,
};
use std::path::Path;
use std::sync::LazyLock;

use serde_json::Value;

use super::TranslationError;
use crate::types::LanguageCode;

/// Language tags recognised in translation file paths.
static LANGUAGE_CODES: LazyLock<HashSet<String>> = LazyLock::new(|| {
    [
        "ar", "ar-SA", "as", "as-IN", "bn", "bn-BD", "bn-IN", "de", "de-DE", "en", "en-GB", "en-IN",
        "en-US", "es", "es-ES", "fa", "fa-IR", "fr", "fr-FR", "gu", "gu-IN", "he", "he-IL", "hi",
        "hi-IN", "ja", "ja-JP", "kn", "kn-IN", "ks", "ml", "ml-IN", "mr", "mr-IN", "ne", "ne-NP",
        "or", "or-IN", "pa", "pa-IN", "pt", "pt-BR", "ru", "sa", "sa-IN", "sd", "ta", "ta-IN", "te",
        "te-IN", "ur", "ur-IN", "ur-PK", "zh", "zh-CN", "zh-TW",
    ]
    .iter()
    .flat_map(|code| {
        let code = (*code).to_string();
        let normalized = normalize_language_code(&code);
        [code, normalized]
    })
    .collect()
});

/// Normalize language code (lowercase and replace - with _)
fn normalize_language_code(code: &str) -> String {
    code.to_lowercase().replace('-', "_")
}

/// Detect language from file path heuristically
///
/// Splits the path by '/' and '.', then searches backwards for a part
/// that matches a known language code.
///
/// # Examples
/// - `locales/en.json` → `en`
/// - `locales/hi/common.json` → `hi`
/// - `translations/ur-PK.json` → `ur-PK`
#[must_use]
pub fn detect_language_from_path(file_path: &Path) -> Option<LanguageCode> {
    let path_str = file_path.to_string_lossy();

    path_str
        .split(['/', '\\', '.'])
        .rev()
        .find(|part| {
            LANGUAGE_CODES.contains(&normalize_language_code(part)) || LANGUAGE_CODES.contains(*part)
        })
        .map(LanguageCode::from)
}

/// A node of a translation tree: either a localized string or a nested tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    Leaf(String),
    Branch(TranslationTree),
}

impl TranslationNode {
    /// Converts a JSON value into a node.
    ///
    /// Returns `None` for values that cannot be addressed by a dotted path
    /// (`null` and arrays).
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => {
                let mut tree = TranslationTree::default();
                for (segment, child) in map {
                    match Self::from_json(child) {
                        Some(node) => {
                            tree.insert(segment.clone(), node);
                        }
                        None => tracing::debug!(segment = %segment, "Skipping non-addressable translation value"),
                    }
                }
                Some(Self::Branch(tree))
            }
            Value::String(s) => Some(Self::Leaf(s.clone())),
            Value::Number(_) | Value::Bool(_) => Some(Self::Leaf(value.to_string())),
            Value::Null | Value::Array(_) => None,
        }
    }

    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            Self::Branch(_) => None,
        }
    }
}

/// Recursively nested mapping from a key segment to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTree {
    children: BTreeMap<String, TranslationNode>,
}

impl TranslationTree {
    /// Builds a tree from a JSON document. The root must be an object.
    pub fn from_json(value: &Value) -> Result<Self, TranslationError> {
        match TranslationNode::from_json(value) {
            Some(TranslationNode::Branch(tree)) => Ok(tree),
            _ => Err(TranslationError::InvalidRoot),
        }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self { children: BTreeMap::new() }
    }

    pub fn insert(&mut self, segment: impl Into<String>, node: TranslationNode) {
        self.children.insert(segment.into(), node);
    }

    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&TranslationNode> {
        self.children.get(segment)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Follows `segments` from this tree.
    ///
    /// Fails as soon as a segment is missing or a leaf is reached while
    /// segments remain.
    pub fn walk<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Option<&TranslationNode> {
        let mut segments = segments.into_iter();
        let first = segments.next()?;
        let mut node = self.get(first)?;
        for segment in segments {
            match node {
                TranslationNode::Branch(tree) => node = tree.get(segment)?,
                TranslationNode::Leaf(_) => return None,
            }
        }
        Some(node)
    }

    /// Deep merge: leaves of `other` replace leaves of `self`.
    pub fn merge(&mut self, other: Self) {
        for (segment, node) in other.children {
            match (self.children.get_mut(&segment), node) {
                (Some(TranslationNode::Branch(existing)), TranslationNode::Branch(incoming)) => {
                    existing.merge(incoming);
                }
                (_, node) => {
                    self.children.insert(segment, node);
                }
            }
        }
    }

    /// Flatten the tree into a dot-separated key map.
    ///
    /// # Examples
    /// ```
    /// use portal_i18n::input::translation::TranslationTree;
    /// use serde_json::json;
    ///
    /// let tree = TranslationTree::from_json(&json!({
    ///     "nav": { "home": "Home", "schemes": "Schemes" }
    /// }))
    /// .unwrap();
    ///
    /// let flattened = tree.flatten(".");
    /// assert_eq!(flattened.get("nav.home"), Some(&"Home".to_string()));
    /// assert_eq!(flattened.get("nav.schemes"), Some(&"Schemes".to_string()));
    /// ```
    #[must_use]
    pub fn flatten(&self, separator: &str) -> HashMap<String, String> {
        let mut result = HashMap::new();
        flatten_tree(self, separator, None, &mut result);
        result
    }
}

fn flatten_tree(
    tree: &TranslationTree,
    separator: &str,
    prefix: Option<&str>,
    result: &mut HashMap<String, String>,
) {
    for (segment, node) in &tree.children {
        let full_key =
            prefix.map_or_else(|| segment.clone(), |p| format!("{p}{separator}{segment}"));
        match node {
            TranslationNode::Leaf(text) => {
                result.insert(full_key, text.clone());
            }
            TranslationNode::Branch(child) => {
                flatten_tree(child, separator, Some(&full_key), result);
            }
        }
    }
}

/// Load a translation file, detecting its language from the path.
///
/// # Errors
/// Returns error if the language cannot be detected, or the file read or
/// JSON parse fails.
pub fn load_translation_file(
    file_path: &Path,
) -> Result<(LanguageCode, TranslationTree), TranslationError> {
    let language = detect_language_from_path(file_path)
        .ok_or_else(|| TranslationError::UnknownLanguage(file_path.to_path_buf()))?;

    let content = std::fs::read_to_string(file_path)
        .map_err(|source| TranslationError::Read { path: file_path.to_path_buf(), source })?;
    let json: Value = serde_json::from_str(&content)
        .map_err(|source| TranslationError::Parse { path: file_path.to_path_buf(), source })?;

    let tree = TranslationTree::from_json(&json)?;
    tracing::debug!(path = %file_path.display(), %language, "Loaded translation file");

    Ok((language, tree))
}
