//! Query extraction
//!
//! Pulls the active search text out of a result-page URL using the matched
//! engine's parameter conventions. Engines that rewrite their URL after the
//! page loads get a second, authoritative source: the page-context script,
//! reached through the messaging channel.

use crate::engines::SearchEngine;
use crate::messaging::PageChannel;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Extracts the engine's query parameter from a result-page URL.
///
/// The lookup key comes from the engine record, not a fixed name: one
/// provider uses `query`, another `MT`. Percent- and plus-encoding are
/// undone by the parser; the first occurrence of the key wins. Absent keys
/// and unparseable URLs both yield an empty string.
pub fn extract_query(engine: &SearchEngine, url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => {
            debug!("query extraction skipped, URL does not parse: {}", url);
            return String::new();
        }
    };

    parsed
        .query_pairs()
        .find(|(key, _)| key == engine.query_key.as_str())
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

/// Resolves the active query string for a matched engine.
#[derive(Clone, Default)]
pub struct QueryResolver {
    page: Option<Arc<dyn PageChannel>>,
}

impl QueryResolver {
    /// Resolver without a page-context channel; every lookup parses the URL.
    pub fn new() -> Self {
        Self { page: None }
    }

    /// Attach a channel into the page's execution context.
    pub fn with_page_channel(mut self, channel: Arc<dyn PageChannel>) -> Self {
        self.page = Some(channel);
        self
    }

    /// The current query string for `engine` on the page at `url`.
    ///
    /// Engines flagged `query_need_content_script` rewrite the parameter
    /// after load, so for those the page context is asked first and the URL
    /// parse serves as the fallback. Everything else reads the URL directly.
    pub async fn resolve(&self, engine: &SearchEngine, url: &str) -> String {
        if engine.query_need_content_script {
            if let Some(page) = &self.page {
                match page.request_query_string().await {
                    Ok(query) => return query,
                    Err(err) => {
                        debug!(
                            "page context unavailable for {}, falling back to URL: {}",
                            engine.id, err
                        );
                    }
                }
            }
        }
        extract_query(engine, url)
    }
}
