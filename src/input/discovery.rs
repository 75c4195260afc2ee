//! Translation file discovery
use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use globset::Glob;
use ignore::WalkBuilder;

use super::TranslationError;
use super::table::TranslationTable;
use super::translation::{
    TranslationTree,
    load_translation_file,
};
use crate::types::LanguageCode;

/// Load every translation file under `dir` matching `file_pattern`.
///
/// Files of the same language are merged in path order, so a later file
/// overrides leaves of an earlier one. Files without a detectable language
/// are skipped.
///
/// # Errors
/// - Invalid glob pattern
/// - Unreadable or malformed translation file
/// - No `en` dictionary found
pub fn load_translation_dir(
    dir: &Path,
    file_pattern: &str,
) -> Result<TranslationTable, TranslationError> {
    tracing::debug!(dir = %dir.display(), file_pattern, "Loading translations");

    let mut languages: HashMap<LanguageCode, TranslationTree> = HashMap::new();
    for path in find_translation_files(dir, file_pattern)? {
        let (language, tree) = match load_translation_file(&path) {
            Ok(loaded) => loaded,
            Err(TranslationError::UnknownLanguage(path)) => {
                tracing::warn!(path = %path.display(), "Skipping file with unknown language");
                continue;
            }
            Err(e) => return Err(e),
        };
        languages.entry(language).or_default().merge(tree);
    }

    TranslationTable::with_english_fallback(languages)
}

/// Translation files under `dir`, sorted by path.
fn find_translation_files(dir: &Path, file_pattern: &str) -> Result<Vec<PathBuf>, TranslationError> {
    let matcher = Glob::new(file_pattern)
        .map_err(|source| TranslationError::Pattern { pattern: file_pattern.to_string(), source })?
        .compile_matcher();

    let mut found_files = Vec::new();
    for result in WalkBuilder::new(dir).hidden(false).git_ignore(true).follow_links(false).build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(dir) else {
            continue;
        };
        if matcher.is_match(relative_path) {
            found_files.push(path.to_path_buf());
        }
    }

    found_files.sort();
    Ok(found_files)
}
