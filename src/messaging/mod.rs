//! Cross-context messaging contract
//!
//! Fixes the wire shapes exchanged between the privileged background context
//! and the page-context script. The transport carrying them is the host's
//! concern and stays opaque behind [`PageChannel`].

use crate::engines::SearchEngine;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A message crossing the background/page boundary, adjacently tagged the
/// way the platform runtime serializes it: `{"type": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Message {
    /// Query-string exchange with the page context. The request carries an
    /// empty string; the response carries the decoded query text.
    GetQueryStringFromPage(String),
    /// Push from the background context: the enabled rotation changed.
    /// Carries the full engine records in rotation order.
    GetEnabledEnginesFromBg(Vec<SearchEngine>),
}

/// Channel into the page's execution context.
///
/// Implementations wrap whatever transport the platform offers; failures
/// surface as opaque errors and callers fall back to URL-based extraction.
#[async_trait]
pub trait PageChannel: Send + Sync {
    /// Ask the page-context script for the authoritative current query
    /// string, already decoded.
    async fn request_query_string(&self) -> Result<String>;

    /// Push the current enabled engines, in rotation order, to the page
    /// context.
    async fn push_enabled_engines(&self, engines: &[SearchEngine]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::{EngineId, EngineRegistry};
    use serde_json::json;

    #[test]
    fn test_query_string_wire_shape() {
        let msg = Message::GetQueryStringFromPage("cats".to_string());
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({"type": "getQueryStringFromPage", "data": "cats"})
        );
    }

    #[test]
    fn test_enabled_engines_wire_shape() {
        let registry = EngineRegistry::new();
        let msg = Message::GetEnabledEnginesFromBg(vec![
            registry.get(EngineId::Duckduckgo).clone(),
            registry.get(EngineId::YahooJp).clone(),
        ]);

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "getEnabledEnginesFromBg");
        assert_eq!(
            value["data"][0],
            json!({
                "id": "duckduckgo",
                "name": "DuckDuckGo",
                "hostname": "duckduckgo.com",
                "queryKey": "q",
                "queryUrl": "https://duckduckgo.com/?q={}",
                "queryNeedContentScript": false,
                "iconUrl": "img/engines/duckduckgo.svg"
            })
        );
        assert_eq!(value["data"][1]["id"], "yahoo-jp");
    }

    #[test]
    fn test_enabled_engines_round_trip() {
        let registry = EngineRegistry::new();
        let msg = Message::GetEnabledEnginesFromBg(vec![registry.get(EngineId::Goo).clone()]);

        let raw = serde_json::to_string(&msg).unwrap();
        assert_eq!(serde_json::from_str::<Message>(&raw).unwrap(), msg);
    }

    #[test]
    fn test_message_round_trip() {
        let raw = r#"{"type":"getQueryStringFromPage","data":"rust lifetimes"}"#;
        let msg: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(
            msg,
            Message::GetQueryStringFromPage("rust lifetimes".to_string())
        );
    }
}
