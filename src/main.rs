//! Command line front end for the portal localisation engine.

use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;
use std::sync::Arc;

use chrono::{
    NaiveDate,
    NaiveDateTime,
};
use clap::{
    Parser,
    Subcommand,
};
use portal_i18n::config::{
    ConfigError,
    ConfigManager,
};
use portal_i18n::i18n::{
    Formatter,
    JsonFileStore,
    LanguageBus,
    LanguageError,
    LanguageStore,
    Resolver,
    interpolate,
};
use portal_i18n::input::discovery::load_translation_dir;
use portal_i18n::input::{
    TranslationError,
    TranslationTable,
};
use portal_i18n::location::{
    GeoPoint,
    Location,
    LocationDirectory,
    LocationOperatingProfile,
    current_operating_status,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Storage file used when `--store` is not given, relative to the workspace.
const DEFAULT_STORE_FILE: &str = ".portal-i18n.storage.json";

#[derive(Parser, Debug)]
#[command(name = "portal-i18n", version, about = "Portal localisation toolkit")]
struct Cli {
    /// Directory containing `.portal-i18n.json`
    #[arg(long, global = true, env = "PORTAL_I18N_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// JSON file holding the persisted language
    #[arg(long, global = true, env = "PORTAL_I18N_STORE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a translation key
    Resolve {
        key: String,
        /// Language to resolve in. Defaults to the persisted language
        #[arg(long)]
        lang: Option<String>,
        /// Text used when no dictionary has the key
        #[arg(long)]
        fallback: Option<String>,
        /// Placeholder value, `name=value`
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// List languages with translations
    Languages,
    /// Persist the active language
    SetLanguage { code: String },
    /// Locale-aware formatting
    Format {
        #[arg(long, global = true)]
        lang: Option<String>,
        #[command(subcommand)]
        kind: FormatCommand,
    },
    /// Operating status of a location profile
    Status {
        profile: PathBuf,
        /// Local time, `YYYY-MM-DD HH:MM`. Defaults to now
        #[arg(long, value_parser = parse_local_time)]
        at: Option<NaiveDateTime>,
    },
    /// Locations within a radius, nearest first
    Nearby {
        locations: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        #[arg(long, default_value_t = 10.0)]
        radius_km: f64,
        #[arg(long, value_parser = parse_local_time)]
        at: Option<NaiveDateTime>,
        /// Only list locations open at `--at`
        #[arg(long)]
        open: bool,
    },
}

#[derive(Subcommand, Debug)]
enum FormatCommand {
    Number {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    Date {
        date: NaiveDate,
    },
    Currency {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// ISO 4217 code. Defaults to `defaultCurrency`
        #[arg(long)]
        currency: Option<String>,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Translation(#[from] TranslationError),
    #[error(transparent)]
    Language(#[from] LanguageError),
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

fn parse_local_time(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    serde_json::from_str(&content).map_err(|source| CliError::Parse { path: path.to_path_buf(), source })
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn open_store(cli: &Cli) -> Result<LanguageStore, CliError> {
    let workspace = cli.workspace.clone().or_else(|| std::env::current_dir().ok());

    let config = ConfigManager::load(workspace.as_deref())?;
    if let Some(source) = config.source() {
        tracing::debug!(config = %source.display(), "Using workspace config");
    }
    let settings = config.into_settings();

    let table = match &settings.translations_dir {
        Some(dir) => load_translation_dir(dir, &settings.translation_files.file_pattern)?,
        None => TranslationTable::builtin()?,
    };

    let store_path = cli.store.clone().unwrap_or_else(|| {
        workspace.map_or_else(|| PathBuf::from(DEFAULT_STORE_FILE), |root| root.join(DEFAULT_STORE_FILE))
    });
    tracing::debug!(store = %store_path.display(), "Opening language store");

    Ok(LanguageStore::initialize(
        Arc::new(table),
        Arc::new(JsonFileStore::new(store_path)),
        LanguageBus::default(),
        settings,
    ))
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let store = open_store(&cli)?;
    let separator = store.settings().key_separator.as_str();

    match cli.command {
        Command::Resolve { key, lang, fallback, params } => {
            let language = lang.unwrap_or_else(|| store.current_language().to_string());
            let resolver = Resolver::new(store.table(), &language, separator);
            let params: Vec<(&str, &str)> =
                params.iter().map(|(name, value)| (name.as_str(), value.as_str())).collect();
            println!("{}", interpolate(&resolver.resolve(&key, fallback.as_deref()), &params));
        }
        Command::Languages => {
            let current = store.current_language();
            for info in store.available_languages() {
                let marker = if info.code == current { "*" } else { " " };
                let missing = store.table().missing_keys(info.code.as_str(), separator).len();
                println!(
                    "{marker} {}\t{}\t{}\t{missing} missing",
                    info.code, info.native_name, info.direction
                );
            }
        }
        Command::SetLanguage { code } => {
            store.change_language(&code).await?;
            let document = store.document();
            println!("{} ({})", document.lang, document.dir);
        }
        Command::Format { lang, kind } => {
            let formatter = lang.map_or_else(|| store.formatter(), |lang| Formatter::new(lang.into()));
            let output = match kind {
                FormatCommand::Number { value } => formatter.format_number(value),
                FormatCommand::Date { date } => formatter.format_date(date),
                FormatCommand::Currency { amount, currency } => {
                    let code = currency.unwrap_or_else(|| store.settings().default_currency.clone());
                    formatter.format_currency(amount, &code)
                }
            };
            println!("{output}");
        }
        Command::Status { profile, at } => {
            let profile: LocationOperatingProfile = read_json(&profile)?;
            let options = store.settings().location.status_options();
            let status = current_operating_status(&profile, at.unwrap_or_else(now), options);
            println!("{status}\t{}", store.translate(status.label_key(), None));
        }
        Command::Nearby { locations, lat, lng, radius_km, at, open } => {
            let directory = LocationDirectory::new(read_json::<Vec<Location>>(&locations)?);
            let options = store.settings().location.status_options();
            let at = at.unwrap_or_else(now);
            let translator = store.translator();
            let formatter = translator.formatter();

            for (location, km) in directory.nearby(&GeoPoint::new(lng, lat), radius_km) {
                let status = location.operating_status(at, options);
                if open && !status.is_open() {
                    continue;
                }
                let km = formatter.format_number(round_tenths(km));
                println!(
                    "{}\t{}\t{}",
                    location.name,
                    translator.t_with("locations.distance", &[("km", &km)]),
                    translator.t(status.label_key()),
                );
            }
        }
    }

    Ok(())
}

#[allow(clippy::float_arithmetic)]
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[tokio::main]
async fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(writer)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
