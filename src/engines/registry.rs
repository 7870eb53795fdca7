//! Engine lookup: id resolution and URL-to-engine matching

use super::catalog::{all_engines, EngineId, SearchEngine, UnknownEngine};
use url::Url;

/// Lookup handle over the fixed engine catalog.
///
/// The registry owns no data; it is a cheap, copyable view of the static
/// catalog that callers pass around or inject instead of reaching for a
/// global.
#[derive(Debug, Clone, Copy)]
pub struct EngineRegistry {
    engines: &'static [SearchEngine],
}

impl EngineRegistry {
    /// Create a registry over the full catalog.
    pub fn new() -> Self {
        Self {
            engines: all_engines(),
        }
    }

    /// All engines, in catalog declaration order.
    pub fn engines(&self) -> &'static [SearchEngine] {
        self.engines
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Look up an engine by typed id.
    pub fn get(&self, id: EngineId) -> &'static SearchEngine {
        // Catalog order matches id declaration order (enforced by the catalog
        // tests), so the id doubles as the catalog index.
        let engines = self.engines;
        &engines[id as usize]
    }

    /// Look up an engine by its wire id string.
    ///
    /// Ids outside the fixed catalog indicate a stale or corrupted reference
    /// (for example a settings record written by a different version) and
    /// fail with [`UnknownEngine`] rather than silently substituting an
    /// engine.
    pub fn get_by_id(&self, id: &str) -> Result<&'static SearchEngine, UnknownEngine> {
        Ok(self.get(id.parse()?))
    }

    /// Match a URL to the engine serving it.
    ///
    /// The URL's hostname is compared against each catalog entry's hostname
    /// fingerprint with a substring test, so regional mirrors such as
    /// `s7-us4.startpage.com` still match. The first entry wins in
    /// declaration order; fingerprints are kept pairwise disjoint so order
    /// never decides between real hostnames. Unparseable URLs and hosts
    /// outside the catalog are "no match", not errors.
    pub fn match_url(&self, url: &str) -> Option<&'static SearchEngine> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        let engines = self.engines;
        engines.iter().find(|e| host.contains(e.hostname.as_str()))
    }

    /// Whether any catalog engine serves this URL.
    pub fn is_supported(&self, url: &str) -> bool {
        self.match_url(url).is_some()
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_covers_every_id() {
        let registry = EngineRegistry::new();
        for id in EngineId::ALL {
            assert_eq!(registry.get(id).id, id);
        }
    }

    #[test]
    fn test_get_by_id() {
        let registry = EngineRegistry::new();
        assert_eq!(registry.get_by_id("goo").unwrap().id, EngineId::Goo);
        assert_eq!(
            registry.get_by_id("altavista"),
            Err(UnknownEngine("altavista".to_string()))
        );
    }

    #[test]
    fn test_match_url_mirror_subdomain() {
        let registry = EngineRegistry::new();
        let engine = registry
            .match_url("https://s7-us4.startpage.com/sp/search?query=cats")
            .unwrap();
        assert_eq!(engine.id, EngineId::Startpage);
    }

    #[test]
    fn test_match_url_wikipedia() {
        let registry = EngineRegistry::new();
        let engine = registry
            .match_url("https://en.wikipedia.org/w/index.php?search=owls&title=Special:Search")
            .unwrap();
        assert_eq!(engine.id, EngineId::Enwiki);
    }

    #[test]
    fn test_match_url_unsupported_host() {
        let registry = EngineRegistry::new();
        assert!(registry.match_url("https://example.com").is_none());
        assert!(!registry.is_supported("https://example.com"));
    }

    #[test]
    fn test_match_url_unparseable() {
        let registry = EngineRegistry::new();
        assert!(registry.match_url("not a url").is_none());
        assert!(registry.match_url("").is_none());
    }

    #[test]
    fn test_match_url_distinguishes_yahoo_regions() {
        let registry = EngineRegistry::new();
        let us = registry
            .match_url("https://search.yahoo.com/search?p=rust")
            .unwrap();
        let jp = registry
            .match_url("https://search.yahoo.co.jp/search?p=rust")
            .unwrap();
        assert_eq!(us.id, EngineId::YahooUs);
        assert_eq!(jp.id, EngineId::YahooJp);
    }
}
