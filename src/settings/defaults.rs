//! Locale-derived default settings
//!
//! The default engine rotation depends on where the user is: Japanese and
//! Taiwanese users get the goo/Yahoo! JAPAN pair, users with a regional
//! Russian locale get the Russian Yandex front end, and everyone else gets
//! the international variants.

use crate::engines::EngineId;
use crate::settings::schema::{ExtraFlags, FloatButton, Settings, SCHEMA_API_LEVEL};
use tracing::debug;
use unic_langid::{langid, LanguageIdentifier};

/// Parses BCP 47 tags into locale identifiers, dropping any that do not
/// parse. Order is preserved.
pub fn parse_locale_tags<I, S>(tags: I) -> Vec<LanguageIdentifier>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|tag| {
            let tag = tag.as_ref();
            match tag.parse::<LanguageIdentifier>() {
                Ok(locale) => Some(locale),
                Err(_) => {
                    debug!("ignoring unparseable locale tag: {}", tag);
                    None
                }
            }
        })
        .collect()
}

/// Computes the default settings for the given ordered locale preference
/// list. Pure and deterministic: identical input yields identical output.
pub fn default_settings(locales: &[LanguageIdentifier]) -> Settings {
    Settings {
        api_level: SCHEMA_API_LEVEL,
        enabled_engines: default_engines(locales),
        float_button: FloatButton { enabled: true },
        extra: ExtraFlags::default(),
    }
}

/// The default rotation, in cycling order.
///
/// 1. Start with [duckduckgo, ecosia, startpage].
/// 2. For ja-JP or zh-TW, append [goo, yahoo-jp]; otherwise, for any
///    regional Russian locale, append [yandex-ru].
/// 3. Append yandex-en unless yandex-ru made the list, then yahoo-us unless
///    yahoo-jp did.
/// 4. Finish with [bing, google].
fn default_engines(locales: &[LanguageIdentifier]) -> Vec<EngineId> {
    let mut engines = vec![EngineId::Duckduckgo, EngineId::Ecosia, EngineId::Startpage];

    if locales.iter().any(wants_japanese_engines) {
        engines.push(EngineId::Goo);
        engines.push(EngineId::YahooJp);
    } else if locales.iter().any(is_regional_russian) {
        engines.push(EngineId::YandexRu);
    }

    if !engines.contains(&EngineId::YandexRu) {
        engines.push(EngineId::YandexEn);
    }
    if !engines.contains(&EngineId::YahooJp) {
        engines.push(EngineId::YahooUs);
    }

    engines.push(EngineId::Bing);
    engines.push(EngineId::Google);
    engines
}

/// Locales served by goo and Yahoo! JAPAN: Japan itself plus Taiwan.
fn wants_japanese_engines(locale: &LanguageIdentifier) -> bool {
    *locale == langid!("ja-JP") || *locale == langid!("zh-TW")
}

/// A Russian-language locale carrying a region subtag, e.g. ru-RU or ru-BY.
fn is_regional_russian(locale: &LanguageIdentifier) -> bool {
    locale.language.as_str() == "ru" && locale.region.is_some()
}
