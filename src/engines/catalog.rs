//! The fixed catalog of supported search engines

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a supported search engine.
///
/// The kebab-case serialized form (`"yandex-en"`, `"yahoo-jp"`, ...) is the
/// id stored in settings records and sent over the messaging channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineId {
    Duckduckgo,
    Ecosia,
    Startpage,
    Bing,
    Google,
    YandexEn,
    YandexRu,
    YahooUs,
    YahooJp,
    Goo,
    Enwiki,
}

impl EngineId {
    /// Every engine id, in catalog order.
    pub const ALL: [EngineId; 11] = [
        EngineId::Duckduckgo,
        EngineId::Ecosia,
        EngineId::Startpage,
        EngineId::Bing,
        EngineId::Google,
        EngineId::YandexEn,
        EngineId::YandexRu,
        EngineId::YahooUs,
        EngineId::YahooJp,
        EngineId::Goo,
        EngineId::Enwiki,
    ];

    /// The wire form of the id.
    pub const fn as_str(self) -> &'static str {
        match self {
            EngineId::Duckduckgo => "duckduckgo",
            EngineId::Ecosia => "ecosia",
            EngineId::Startpage => "startpage",
            EngineId::Bing => "bing",
            EngineId::Google => "google",
            EngineId::YandexEn => "yandex-en",
            EngineId::YandexRu => "yandex-ru",
            EngineId::YahooUs => "yahoo-us",
            EngineId::YahooJp => "yahoo-jp",
            EngineId::Goo => "goo",
            EngineId::Enwiki => "enwiki",
        }
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for engine ids outside the fixed catalog.
///
/// A stale or corrupted id reference is a contract violation, not a transient
/// condition, so lookups fail loudly instead of substituting another engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search engine id: {0}")]
pub struct UnknownEngine(pub String);

impl FromStr for EngineId {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "duckduckgo" => Ok(EngineId::Duckduckgo),
            "ecosia" => Ok(EngineId::Ecosia),
            "startpage" => Ok(EngineId::Startpage),
            "bing" => Ok(EngineId::Bing),
            "google" => Ok(EngineId::Google),
            "yandex-en" => Ok(EngineId::YandexEn),
            "yandex-ru" => Ok(EngineId::YandexRu),
            "yahoo-us" => Ok(EngineId::YahooUs),
            "yahoo-jp" => Ok(EngineId::YahooJp),
            "goo" => Ok(EngineId::Goo),
            "enwiki" => Ok(EngineId::Enwiki),
            _ => Err(UnknownEngine(s.to_string())),
        }
    }
}

/// A supported search engine, as declared in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEngine {
    /// Unique engine id.
    pub id: EngineId,
    /// Display name.
    pub name: String,
    /// Hostname fingerprint: the minimal substring that identifies the
    /// engine's domain. StartPage serves from rotating mirrors such as
    /// `s7-us4.startpage.com`, so its fingerprint is `startpage.com` rather
    /// than `www.startpage.com`.
    pub hostname: String,
    /// Name of the URL query parameter carrying the search text
    /// (`q` in `?q=`, but `query`, `text`, `p`, `MT` or `search` elsewhere).
    pub query_key: String,
    /// Search URL template with a single `{}` placeholder for the encoded
    /// query, e.g. `https://duckduckgo.com/?q={}`.
    pub query_url: String,
    /// Whether the current query must be fetched through the page-context
    /// script: the engine rewrites its query parameter after load, so the
    /// visible URL can go stale.
    pub query_need_content_script: bool,
    /// Icon resource locator, resolved by the host platform.
    pub icon_url: String,
}

impl SearchEngine {
    /// Build the search URL for `query` by substituting the percent-encoded
    /// text into the engine's URL template.
    pub fn search_url(&self, query: &str) -> String {
        let encoded = urlencoding::encode(query);
        self.query_url.replacen("{}", &encoded, 1)
    }
}

/// The full catalog, in declaration order. Declaration order is also the
/// tie-break order for URL matching and must stay aligned with
/// [`EngineId::ALL`].
static ALL_ENGINES: Lazy<Vec<SearchEngine>> = Lazy::new(build_catalog);

/// All supported engines, in catalog order.
pub fn all_engines() -> &'static [SearchEngine] {
    &ALL_ENGINES
}

fn entry(
    id: EngineId,
    name: &str,
    hostname: &str,
    query_key: &str,
    query_url: &str,
    query_need_content_script: bool,
    icon: &str,
) -> SearchEngine {
    SearchEngine {
        id,
        name: name.to_string(),
        hostname: hostname.to_string(),
        query_key: query_key.to_string(),
        query_url: query_url.to_string(),
        query_need_content_script,
        icon_url: format!("img/engines/{}.svg", icon),
    }
}

fn build_catalog() -> Vec<SearchEngine> {
    vec![
        entry(
            EngineId::Duckduckgo,
            "DuckDuckGo",
            "duckduckgo.com",
            "q",
            "https://duckduckgo.com/?q={}",
            false,
            "duckduckgo",
        ),
        entry(
            EngineId::Ecosia,
            "Ecosia",
            "www.ecosia.org",
            "q",
            "https://www.ecosia.org/search?q={}",
            false,
            "ecosia",
        ),
        entry(
            EngineId::Startpage,
            "StartPage",
            "startpage.com",
            "query",
            "https://www.startpage.com/sp/search?query={}",
            true,
            "startpage",
        ),
        entry(
            EngineId::Bing,
            "Bing",
            "www.bing.com",
            "q",
            "https://www.bing.com/search?q={}",
            false,
            "bing",
        ),
        entry(
            EngineId::Google,
            "Google",
            "www.google.com",
            "q",
            "https://www.google.com/search?q={}",
            false,
            "google",
        ),
        entry(
            EngineId::YandexEn,
            "Yandex",
            "yandex.com",
            "text",
            "https://yandex.com/search/?text={}",
            false,
            "yandex-en",
        ),
        entry(
            EngineId::YandexRu,
            "Яндекс",
            "yandex.ru",
            "text",
            "https://yandex.ru/search/?text={}",
            false,
            "yandex-ru",
        ),
        entry(
            EngineId::YahooUs,
            "Yahoo!",
            "search.yahoo.com",
            "p",
            "https://search.yahoo.com/search?p={}",
            false,
            "yahoo-us",
        ),
        entry(
            EngineId::YahooJp,
            "Yahoo! JAPAN",
            "search.yahoo.co.jp",
            "p",
            "https://search.yahoo.co.jp/search?p={}",
            false,
            "yahoo-jp",
        ),
        entry(
            EngineId::Goo,
            "goo",
            "search.goo.ne.jp",
            "MT",
            "https://search.goo.ne.jp/web.jsp?MT={}&IE=UTF-8&OE=UTF-8",
            false,
            "goo",
        ),
        entry(
            EngineId::Enwiki,
            "English Wikipedia (Not recommended)",
            "en.wikipedia.org",
            "search",
            "https://en.wikipedia.org/w/index.php?search={}&title=Special:Search&fulltext=1&ns0=1",
            false,
            "wikipedia",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_id_order() {
        let engines = all_engines();
        assert_eq!(engines.len(), EngineId::ALL.len());
        for (i, engine) in engines.iter().enumerate() {
            assert_eq!(engine.id, EngineId::ALL[i]);
        }
    }

    #[test]
    fn test_ids_unique() {
        let engines = all_engines();
        for a in engines {
            assert_eq!(engines.iter().filter(|b| b.id == a.id).count(), 1);
        }
    }

    #[test]
    fn test_fingerprints_disjoint() {
        // If one fingerprint were a substring of another, a single hostname
        // could match two catalog entries and matching would silently depend
        // on declaration order.
        let engines = all_engines();
        for a in engines {
            for b in engines {
                if a.id != b.id {
                    assert!(
                        !a.hostname.contains(&b.hostname),
                        "{} fingerprint contains {}",
                        a.id,
                        b.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_id_string_round_trip() {
        for id in EngineId::ALL {
            assert_eq!(id.as_str().parse::<EngineId>(), Ok(id));
        }
        assert_eq!(
            "altavista".parse::<EngineId>(),
            Err(UnknownEngine("altavista".to_string()))
        );
    }

    #[test]
    fn test_id_serde_matches_as_str() {
        for id in EngineId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
            let back: EngineId = serde_json::from_str(&json).unwrap();
            assert_eq!(back, id);
        }
    }

    #[test]
    fn test_search_url_encodes_query() {
        let engines = all_engines();
        assert_eq!(
            engines[0].search_url("rust lang"),
            "https://duckduckgo.com/?q=rust%20lang"
        );
        // goo keeps its charset parameters after the placeholder
        let goo = engines.iter().find(|e| e.id == EngineId::Goo).unwrap();
        assert_eq!(
            goo.search_url("猫"),
            "https://search.goo.ne.jp/web.jsp?MT=%E7%8C%AB&IE=UTF-8&OE=UTF-8"
        );
    }
}
