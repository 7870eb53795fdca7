//! In-memory storage backend
//!
//! Backs the test suite and serves as the settings store's last-resort
//! fallback when the host platform provides no durable area at all.

use super::{AreaItems, AreaScope, StorageArea, StorageError, StorageHost};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A storage area held entirely in process memory.
pub struct MemoryArea {
    scope: AreaScope,
    items: RwLock<AreaItems>,
    writes: AtomicUsize,
}

impl MemoryArea {
    /// Create an empty area for `scope`.
    pub fn new(scope: AreaScope) -> Self {
        Self {
            scope,
            items: RwLock::new(AreaItems::new()),
            writes: AtomicUsize::new(0),
        }
    }

    /// Replace the stored items outright, without counting as a write.
    pub async fn seed(&self, items: AreaItems) {
        *self.items.write().await = items;
    }

    /// Number of completed `write` calls. Tests use this to check that the
    /// self-healing path persists defaults exactly once.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Copy of the current items.
    pub async fn snapshot(&self) -> AreaItems {
        self.items.read().await.clone()
    }
}

#[async_trait]
impl StorageArea for MemoryArea {
    fn scope(&self) -> AreaScope {
        self.scope
    }

    async fn read_all(&self) -> Result<AreaItems, StorageError> {
        Ok(self.items.read().await.clone())
    }

    async fn write(&self, items: AreaItems) -> Result<(), StorageError> {
        let mut stored = self.items.write().await;
        for (key, value) in items {
            stored.insert(key, value);
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A storage host backed by in-memory areas.
pub struct MemoryHost {
    sync: Option<Arc<MemoryArea>>,
    local: Arc<MemoryArea>,
}

impl MemoryHost {
    /// Host with both a "sync" and a "local" area.
    pub fn new() -> Self {
        Self {
            sync: Some(Arc::new(MemoryArea::new(AreaScope::Sync))),
            local: Arc::new(MemoryArea::new(AreaScope::Local)),
        }
    }

    /// Host without a "sync" area, like Firefox for Android.
    pub fn without_sync() -> Self {
        Self {
            sync: None,
            local: Arc::new(MemoryArea::new(AreaScope::Local)),
        }
    }

    /// The "sync" area, when present.
    pub fn sync_area(&self) -> Option<Arc<MemoryArea>> {
        self.sync.clone()
    }

    /// The "local" area.
    pub fn local_area(&self) -> Arc<MemoryArea> {
        self.local.clone()
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageHost for MemoryHost {
    fn area(&self, scope: AreaScope) -> Option<Arc<dyn StorageArea>> {
        match scope {
            AreaScope::Sync => self.sync.clone().map(|a| a as Arc<dyn StorageArea>),
            AreaScope::Local => Some(self.local.clone() as Arc<dyn StorageArea>),
            AreaScope::Managed | AreaScope::Session => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_write_replaces_per_key() {
        let area = MemoryArea::new(AreaScope::Local);

        let mut first = AreaItems::new();
        first.insert("floatButton".to_string(), json!({"enabled": true}));
        first.insert("apiLevel".to_string(), json!(1));
        area.write(first).await.unwrap();

        // A later write of one key replaces that key wholesale and leaves
        // the others untouched.
        let mut second = AreaItems::new();
        second.insert("floatButton".to_string(), json!({"enabled": false}));
        area.write(second).await.unwrap();

        let items = area.read_all().await.unwrap();
        assert_eq!(items.get("floatButton"), Some(&json!({"enabled": false})));
        assert_eq!(items.get("apiLevel"), Some(&json!(1)));
        assert_eq!(area.write_count(), 2);
    }

    #[tokio::test]
    async fn test_host_hands_out_areas_by_scope() {
        let host = MemoryHost::new();
        assert!(host.area(AreaScope::Sync).is_some());
        assert!(host.area(AreaScope::Local).is_some());
        assert!(host.area(AreaScope::Managed).is_none());

        let no_sync = MemoryHost::without_sync();
        assert!(no_sync.area(AreaScope::Sync).is_none());
        assert!(no_sync.area(AreaScope::Local).is_some());
    }
}
