//! Durable key-value storage abstraction
//!
//! Models the platform's persisted storage: named scopes ("sync", "local")
//! holding top-level JSON items, plus the change-notification payload the
//! platform delivers when items change. The transport behind an area is the
//! host's concern; this module only fixes the shapes.

mod memory;

pub use memory::{MemoryArea, MemoryHost};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Top-level items of a storage area, keyed by item name.
pub type AreaItems = serde_json::Map<String, Value>;

/// Named storage scope.
///
/// Settings persist to `sync` when the platform provides it, `local`
/// otherwise. `managed` and `session` exist on some platforms; changes from
/// them are ignored by the settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaScope {
    Sync,
    Local,
    Managed,
    Session,
}

impl AreaScope {
    /// The platform name of the scope.
    pub const fn as_str(self) -> &'static str {
        match self {
            AreaScope::Sync => "sync",
            AreaScope::Local => "local",
            AreaScope::Managed => "managed",
            AreaScope::Session => "session",
        }
    }

    /// Whether settings changes in this scope are recognized.
    pub const fn is_durable(self) -> bool {
        matches!(self, AreaScope::Sync | AreaScope::Local)
    }
}

impl fmt::Display for AreaScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from a storage area.
///
/// These never escape the settings store: reads and writes that fail degrade
/// to computed defaults.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing area cannot be reached.
    #[error("storage area unavailable: {0}")]
    Unavailable(String),

    /// The backend reported a read or write failure.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Serializing or deserializing an item failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A single durable key-value area.
#[async_trait]
pub trait StorageArea: Send + Sync {
    /// Scope this area persists to.
    fn scope(&self) -> AreaScope;

    /// Read every top-level item in the area. An empty map means the area
    /// holds no record yet.
    async fn read_all(&self) -> Result<AreaItems, StorageError>;

    /// Write the given items. Each present key replaces the stored value for
    /// that key wholesale; keys not present are left untouched (no deep
    /// merge).
    async fn write(&self, items: AreaItems) -> Result<(), StorageError>;
}

/// Hands out the platform's storage areas by scope.
///
/// Returning `None` marks the scope as unsupported; Firefox for Android,
/// for instance, ships without a "sync" area.
pub trait StorageHost: Send + Sync {
    /// The area backing `scope`, if the platform provides one.
    fn area(&self, scope: AreaScope) -> Option<Arc<dyn StorageArea>>;
}

/// Old and new value of one changed item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyChange {
    /// Value before the change; absent when the item was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    /// Value after the change; absent when the item was removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

/// Per-key diffs of one change event, keyed by top-level item name.
pub type ChangeSet = BTreeMap<String, KeyChange>;

/// A change event as delivered by the platform: which scope changed and the
/// per-key old/new diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaChange {
    /// Scope the change occurred in.
    pub scope: AreaScope,
    /// Changed items.
    pub changes: ChangeSet,
}

impl AreaChange {
    /// Create an empty change event for `scope`.
    pub fn new(scope: AreaScope) -> Self {
        Self {
            scope,
            changes: ChangeSet::new(),
        }
    }

    /// Add one key diff.
    pub fn with_change(
        mut self,
        key: impl Into<String>,
        old_value: Option<Value>,
        new_value: Option<Value>,
    ) -> Self {
        self.changes.insert(
            key.into(),
            KeyChange {
                old_value,
                new_value,
            },
        );
        self
    }
}
