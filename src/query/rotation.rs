//! Engine rotation
//!
//! The enabled-engine list's order is the cycling order: "switch" routes the
//! active query to the engine after the current one, wrapping at the end.

use crate::engines::{EngineId, EngineRegistry, SearchEngine};
use crate::query::resolver::QueryResolver;
use crate::settings::Settings;

/// The engine following `current` in the rotation.
///
/// Wraps at the end of the list. A `current` that is not in the list (just
/// disabled, say) restarts the rotation at the first enabled engine. An
/// empty list has no next engine.
pub fn next_in_rotation(enabled: &[EngineId], current: EngineId) -> Option<EngineId> {
    if enabled.is_empty() {
        return None;
    }
    let next = match enabled.iter().position(|id| *id == current) {
        Some(index) => enabled[(index + 1) % enabled.len()],
        None => enabled[0],
    };
    Some(next)
}

/// Transient per-navigation state: what the user searched, where they are,
/// and where a switch would take them. Derived on every navigation, never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentState {
    /// The active query text.
    pub keyword: String,
    /// Engine serving the current page.
    pub current_engine: &'static SearchEngine,
    /// Engine a switch would route to.
    pub next_engine: &'static SearchEngine,
}

impl CurrentState {
    /// Derive the state for a navigation to `url`.
    ///
    /// `None` when no supported engine serves the URL, or when the enabled
    /// list is empty and rotation has nowhere to go.
    pub async fn derive(
        registry: EngineRegistry,
        settings: &Settings,
        resolver: &QueryResolver,
        url: &str,
    ) -> Option<Self> {
        let current = registry.match_url(url)?;
        let next = next_in_rotation(&settings.enabled_engines, current.id)?;
        let keyword = resolver.resolve(current, url).await;

        Some(Self {
            keyword,
            current_engine: current,
            next_engine: registry.get(next),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{default_settings, parse_locale_tags};

    #[test]
    fn test_next_advances_through_list() {
        let enabled = [EngineId::Duckduckgo, EngineId::Ecosia, EngineId::Bing];
        assert_eq!(
            next_in_rotation(&enabled, EngineId::Duckduckgo),
            Some(EngineId::Ecosia)
        );
        assert_eq!(
            next_in_rotation(&enabled, EngineId::Ecosia),
            Some(EngineId::Bing)
        );
    }

    #[test]
    fn test_next_wraps_at_end_of_list() {
        let enabled = [EngineId::Duckduckgo, EngineId::Ecosia, EngineId::Bing];
        assert_eq!(
            next_in_rotation(&enabled, EngineId::Bing),
            Some(EngineId::Duckduckgo)
        );
    }

    #[test]
    fn test_disabled_current_restarts_rotation() {
        let enabled = [EngineId::Duckduckgo, EngineId::Ecosia];
        assert_eq!(
            next_in_rotation(&enabled, EngineId::Google),
            Some(EngineId::Duckduckgo)
        );
    }

    #[test]
    fn test_single_engine_rotates_to_itself() {
        let enabled = [EngineId::Bing];
        assert_eq!(
            next_in_rotation(&enabled, EngineId::Bing),
            Some(EngineId::Bing)
        );
    }

    #[test]
    fn test_empty_list_has_no_next() {
        assert_eq!(next_in_rotation(&[], EngineId::Bing), None);
    }

    #[tokio::test]
    async fn test_derive_state_for_supported_url() {
        let registry = EngineRegistry::new();
        let settings = default_settings(&parse_locale_tags(["en-US"]));
        let resolver = QueryResolver::new();

        let state = CurrentState::derive(
            registry,
            &settings,
            &resolver,
            "https://www.google.com/search?q=rust+async",
        )
        .await
        .unwrap();

        assert_eq!(state.keyword, "rust async");
        assert_eq!(state.current_engine.id, EngineId::Google);
        // google is last in the default rotation, so switching wraps around.
        assert_eq!(state.next_engine.id, EngineId::Duckduckgo);
    }

    #[tokio::test]
    async fn test_derive_none_for_unsupported_url() {
        let registry = EngineRegistry::new();
        let settings = default_settings(&[]);
        let resolver = QueryResolver::new();

        let state = CurrentState::derive(
            registry,
            &settings,
            &resolver,
            "https://example.com/?q=rust",
        )
        .await;
        assert!(state.is_none());
    }

    #[tokio::test]
    async fn test_derive_restarts_rotation_when_current_disabled() {
        let registry = EngineRegistry::new();
        let mut settings = default_settings(&[]);
        settings.enabled_engines = vec![EngineId::Ecosia, EngineId::Startpage];
        let resolver = QueryResolver::new();

        let state = CurrentState::derive(
            registry,
            &settings,
            &resolver,
            "https://www.google.com/search?q=owls",
        )
        .await
        .unwrap();

        assert_eq!(state.current_engine.id, EngineId::Google);
        assert_eq!(state.next_engine.id, EngineId::Ecosia);
    }
}
