//! User settings
//!
//! The persisted record and its schema check, the locale-aware defaults
//! that seed and heal it, and the durable [`SettingsStore`] handle that
//! ties both to a storage area.

mod defaults;
mod schema;
mod store;

pub use defaults::{default_settings, parse_locale_tags};
pub use schema::{
    ExtraFlags, FloatButton, SchemaViolation, Settings, SettingsPatch, SCHEMA_API_LEVEL,
};
pub use store::{ChangeCallback, SettingsStore, Subscription};
