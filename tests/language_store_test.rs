//! Language store over a workspace config, a dictionary directory and file storage.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use googletest::prelude::*;
use portal_i18n::config::ConfigManager;
use portal_i18n::i18n::{
    JsonFileStore,
    KeyValueStore,
    LanguageBus,
    LanguageError,
    LanguageStore,
    Resolver,
};
use portal_i18n::input::TranslationTable;
use portal_i18n::input::discovery::load_translation_dir;
use portal_i18n::{
    PortalSettings,
    TextDirection,
};
use rstest::rstest;
use tempfile::TempDir;
use tokio_test::{
    assert_err,
    assert_ok,
};

fn write_workspace(root: &Path) {
    fs::write(
        root.join(".portal-i18n.json"),
        r#"{ "translationsDir": "locales", "changeLatencyMs": 0, "storageKey": "portal.language" }"#,
    )
    .unwrap();

    let locales = root.join("locales");
    fs::create_dir_all(locales.join("extra")).unwrap();
    fs::write(
        locales.join("en.json"),
        r#"{ "nav": { "home": "Home", "events": "Events" }, "title": "Portal" }"#,
    )
    .unwrap();
    fs::write(locales.join("hi.json"), r#"{ "nav": { "home": "होम" } }"#).unwrap();
    fs::write(locales.join("ur.json"), r#"{ "nav": { "home": "ہوم" } }"#).unwrap();
    fs::write(locales.join("extra").join("en.json"), r#"{ "nav": { "help": "Help" } }"#).unwrap();
}

fn open(root: &Path) -> LanguageStore {
    let settings = ConfigManager::load(Some(root)).unwrap().into_settings();

    let dir = settings.translations_dir.clone().unwrap();
    let table = load_translation_dir(&dir, &settings.translation_files.file_pattern).unwrap();
    let storage = JsonFileStore::new(root.join("storage.json"));

    LanguageStore::initialize(Arc::new(table), Arc::new(storage), LanguageBus::default(), settings)
}

#[tokio::test]
async fn workspace_dictionaries_drive_resolution() {
    let temp_dir = TempDir::new().unwrap();
    write_workspace(temp_dir.path());
    let store = open(temp_dir.path());

    assert_ok!(store.change_language("hi").await);

    assert_eq!(store.translate("nav.home", None), "होम");
    assert_eq!(store.translate("nav.events", None), "Events");
    assert_eq!(store.translate("nav.help", None), "Help");
    assert_eq!(store.translate("nonexistent.path.x", None), "nonexistent.path.x");
}

#[tokio::test]
async fn language_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    write_workspace(temp_dir.path());

    let store = open(temp_dir.path());
    assert_ok!(store.change_language("ur").await);
    drop(store);

    let reopened = open(temp_dir.path());
    assert_eq!(reopened.current_language().as_str(), "ur");
    assert_eq!(reopened.document().dir, TextDirection::Rtl);

    let storage = JsonFileStore::new(temp_dir.path().join("storage.json"));
    assert_eq!(storage.get("portal.language").unwrap().as_deref(), Some("ur"));
}

#[tokio::test]
async fn rejected_language_keeps_persisted_value() {
    let temp_dir = TempDir::new().unwrap();
    write_workspace(temp_dir.path());
    let store = open(temp_dir.path());
    assert_ok!(store.change_language("hi").await);

    let error = assert_err!(store.change_language("xx").await);

    assert_eq!(error, LanguageError::InvalidLanguage("xx".to_string()));
    assert_eq!(store.current_language().as_str(), "hi");
    assert_eq!(open(temp_dir.path()).current_language().as_str(), "hi");
}

#[rstest]
#[case::hindi("hi")]
#[case::urdu("ur")]
#[case::english("en")]
#[tokio::test]
async fn persisted_round_trip_for_bundled_languages(#[case] code: &str) {
    let temp_dir = TempDir::new().unwrap();
    let storage = Arc::new(JsonFileStore::new(temp_dir.path().join("storage.json")));
    let settings = PortalSettings { change_latency_ms: 0, ..PortalSettings::default() };
    let store = LanguageStore::initialize(
        Arc::new(TranslationTable::builtin().unwrap()),
        storage.clone(),
        LanguageBus::default(),
        settings,
    );

    assert_ok!(store.change_language(code).await);

    assert_eq!(storage.get("language").unwrap().as_deref(), Some(code));
}

#[rstest]
#[case::urdu("ur", TextDirection::Rtl)]
#[case::hindi("hi", TextDirection::Ltr)]
#[case::english("en", TextDirection::Ltr)]
#[tokio::test]
async fn direction_follows_language(#[case] code: &str, #[case] dir: TextDirection) {
    let store = LanguageStore::initialize(
        Arc::new(TranslationTable::builtin().unwrap()),
        Arc::new(portal_i18n::i18n::MemoryStore::new()),
        LanguageBus::default(),
        PortalSettings { change_latency_ms: 0, ..PortalSettings::default() },
    );

    assert_ok!(store.change_language(code).await);

    assert_eq!(store.document().dir, dir);
    assert_eq!(store.document().lang.as_str(), code);
}

#[tokio::test]
async fn stores_on_one_bus_stay_in_sync() {
    let table = Arc::new(TranslationTable::builtin().unwrap());
    let settings = PortalSettings { change_latency_ms: 0, ..PortalSettings::default() };
    let bus = LanguageBus::default();
    let header = LanguageStore::initialize(
        Arc::clone(&table),
        Arc::new(portal_i18n::i18n::MemoryStore::new()),
        bus.clone(),
        settings.clone(),
    );
    let sidebar = Arc::new(LanguageStore::initialize(
        table,
        Arc::new(portal_i18n::i18n::MemoryStore::new()),
        bus.clone(),
        settings,
    ));
    let sync = sidebar.spawn_sync();
    let mut listener = bus.subscribe();

    assert_ok!(header.change_language("ur").await);
    assert_ok!(listener.recv().await);
    for _ in 0..10 {
        if sidebar.current_language().as_str() == "ur" {
            break;
        }
        tokio::task::yield_now().await;
    }

    assert_eq!(sidebar.current_language().as_str(), "ur");
    assert_eq!(sidebar.document().dir, TextDirection::Rtl);
    sync.abort();
}

#[googletest::test]
fn every_english_key_resolves_in_every_language() {
    let table = TranslationTable::builtin().unwrap();
    let keys = table.fallback_tree().flatten(".");

    for language in table.languages().into_iter().map(ToString::to_string).chain(["xx".to_string()]) {
        let resolver = Resolver::new(&table, &language, ".");
        for key in keys.keys() {
            expect_that!(resolver.resolve(key, None), not(eq("")));
        }
    }
}

#[googletest::test]
fn bundled_translations_report_missing_keys() {
    let table = TranslationTable::builtin().unwrap();

    expect_that!(table.missing_keys("en", "."), len(eq(0)));
    expect_that!(table.missing_keys("ur", "."), contains(eq("chatbot.greeting")));
}
