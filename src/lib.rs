//! portal-i18n
//!
//! Localisation layer of a citizen services portal: dotted-key translation
//! lookup with English fallback, the active language state, locale-aware
//! formatting and the derived operating status of service locations.

pub mod config;
pub mod i18n;
pub mod input;
pub mod location;
pub mod types;

mod test_utils;

pub use config::{
    ConfigManager,
    PortalSettings,
};
pub use i18n::{
    Formatter,
    LanguageStore,
    Resolver,
};
pub use input::TranslationTable;
pub use location::current_operating_status;
pub use types::{
    LanguageCode,
    TextDirection,
};
