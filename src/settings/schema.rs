//! Persisted settings record
//!
//! The record lives in the storage area as four top-level keys (`apiLevel`,
//! `enabledEngines`, `floatButton`, `extra`). Deserialization is
//! schema-checking: [`Settings::from_record`] either yields a fully valid
//! record or a [`SchemaViolation`] the loader recovers from.

use crate::engines::EngineId;
use crate::storage::AreaItems;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Version marker written into every persisted record.
pub const SCHEMA_API_LEVEL: u32 = 1;

/// Why a persisted record was rejected.
#[derive(Debug, Error)]
pub enum SchemaViolation {
    /// Missing required keys, wrong value types, or unknown engine ids.
    #[error("settings record has an invalid shape: {0}")]
    Shape(#[from] serde_json::Error),
    /// The record parsed but enables no engines, leaving nothing to cycle
    /// through.
    #[error("settings record enables no engines")]
    NoEnabledEngines,
}

/// The validated user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Schema version of the record. Unrecognized future fields are
    /// tolerated, so this only ever advances when the shape itself breaks.
    #[serde(default = "default_api_level")]
    pub api_level: u32,
    /// Engines offered for switching. Order is the cycling order.
    pub enabled_engines: Vec<EngineId>,
    /// Floating switch panel injected into result pages.
    pub float_button: FloatButton,
    /// Per-engine feature flags.
    #[serde(default)]
    pub extra: ExtraFlags,
}

impl Settings {
    /// Runs the schema check over a raw storage snapshot.
    ///
    /// Absent keys, malformed values, and unknown engine ids all surface as
    /// [`SchemaViolation::Shape`]; an engine list that parses but is empty
    /// surfaces as [`SchemaViolation::NoEnabledEngines`]. Keys beyond the
    /// known schema are ignored.
    pub fn from_record(items: &AreaItems) -> Result<Self, SchemaViolation> {
        let settings: Settings = serde_json::from_value(Value::Object(items.clone()))?;
        if settings.enabled_engines.is_empty() {
            return Err(SchemaViolation::NoEnabledEngines);
        }
        Ok(settings)
    }
}

/// Visibility of the floating switch panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatButton {
    pub enabled: bool,
}

impl Default for FloatButton {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Feature flags that tweak behavior on specific engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraFlags {
    /// Strip the recurring promotional banners from ecosia result pages.
    #[serde(default = "default_true")]
    pub ecosia_eliminate_notifications: bool,
}

impl Default for ExtraFlags {
    fn default() -> Self {
        Self {
            ecosia_eliminate_notifications: true,
        }
    }
}

/// A partial record for [`SettingsStore::save`](crate::settings::SettingsStore::save).
///
/// Only the fields set on the patch are written; each one replaces its
/// top-level key in the storage area wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_engines: Option<Vec<EngineId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub float_button: Option<FloatButton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<ExtraFlags>,
}

impl SettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the enabled engine rotation.
    pub fn with_enabled_engines(mut self, engines: Vec<EngineId>) -> Self {
        self.enabled_engines = Some(engines);
        self
    }

    /// Toggle the floating switch panel.
    pub fn with_float_button(mut self, enabled: bool) -> Self {
        self.float_button = Some(FloatButton { enabled });
        self
    }

    /// Replace the feature-flag block.
    pub fn with_extra(mut self, extra: ExtraFlags) -> Self {
        self.extra = Some(extra);
        self
    }

    /// The top-level storage keys this patch writes.
    pub(crate) fn into_items(self) -> Result<AreaItems, serde_json::Error> {
        match serde_json::to_value(&self)? {
            Value::Object(items) => Ok(items),
            _ => Ok(AreaItems::new()),
        }
    }
}

impl From<Settings> for SettingsPatch {
    fn from(settings: Settings) -> Self {
        Self {
            api_level: Some(settings.api_level),
            enabled_engines: Some(settings.enabled_engines),
            float_button: Some(settings.float_button),
            extra: Some(settings.extra),
        }
    }
}

fn default_api_level() -> u32 {
    SCHEMA_API_LEVEL
}

fn default_true() -> bool {
    true
}
