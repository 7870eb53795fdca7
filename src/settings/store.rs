//! Settings persistence
//!
//! [`SettingsStore`] is an explicit handle over one durable storage area,
//! chosen once at open time: sync when the host offers it, local otherwise,
//! and a process-private in-memory area as the last resort. Loads are
//! self-healing, writes are fire-and-forget, and change notifications flow
//! through a subscription registry with deterministic teardown.

use crate::settings::defaults::default_settings;
use crate::settings::schema::{Settings, SettingsPatch};
use crate::storage::{AreaChange, AreaScope, MemoryArea, StorageArea, StorageHost};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tracing::{debug, info, warn};
use unic_langid::LanguageIdentifier;

/// Callback invoked with every durable-area change.
pub type ChangeCallback = Arc<dyn Fn(&AreaChange) + Send + Sync>;

type SubscriberMap = Mutex<HashMap<u64, ChangeCallback>>;

/// Handle over the persisted user settings.
///
/// The handle is cheap to share behind an `Arc` and never surfaces storage
/// failures: every read degrades to locale-derived defaults and every write
/// failure is logged and dropped.
pub struct SettingsStore {
    area: Arc<dyn StorageArea>,
    locales: Vec<LanguageIdentifier>,
    subscribers: Arc<SubscriberMap>,
    next_token: AtomicU64,
}

impl SettingsStore {
    /// Opens a store over the most durable area the host offers.
    ///
    /// Selection runs once; the chosen area is used for the lifetime of the
    /// handle. Hosts with no durable area at all (some mobile builds) get a
    /// process-private in-memory area so the rest of the system never has to
    /// special-case a missing store.
    pub fn open(host: &dyn StorageHost, locales: Vec<LanguageIdentifier>) -> Self {
        let area = host
            .area(AreaScope::Sync)
            .or_else(|| host.area(AreaScope::Local))
            .unwrap_or_else(|| {
                warn!("no durable storage area available, settings will not persist");
                Arc::new(MemoryArea::new(AreaScope::Local))
            });
        debug!("settings store opened over {} area", area.scope());

        Self {
            area,
            locales,
            subscribers: Arc::new(Mutex::new(HashMap::new())),
            next_token: AtomicU64::new(0),
        }
    }

    /// The scope of the area this store persists into.
    pub fn scope(&self) -> AreaScope {
        self.area.scope()
    }

    /// The locale preference list the store derives defaults from.
    pub fn locales(&self) -> &[LanguageIdentifier] {
        &self.locales
    }

    /// Loads the current settings.
    ///
    /// A record that is absent, unreadable, or fails the schema check is
    /// replaced: defaults are computed from the store's locales, persisted
    /// back, and returned. Concurrent loads may each heal, which is safe
    /// because they all write the identical deterministic record.
    pub async fn load(&self) -> Settings {
        let record = match self.area.read_all().await {
            Ok(items) => items,
            Err(err) => {
                warn!(
                    "settings read from {} area failed: {}",
                    self.area.scope(),
                    err
                );
                return self.heal().await;
            }
        };

        match Settings::from_record(&record) {
            Ok(settings) => settings,
            Err(violation) => {
                if record.is_empty() {
                    info!("no settings record found, seeding defaults");
                } else {
                    warn!("settings record rejected: {}", violation);
                }
                self.heal().await
            }
        }
    }

    /// Writes a partial record to the durable area.
    ///
    /// Each field set on the patch replaces its top-level key wholesale, so
    /// callers supply complete substructures. Failures are logged and
    /// swallowed.
    pub async fn save(&self, patch: SettingsPatch) {
        let items = match patch.into_items() {
            Ok(items) => items,
            Err(err) => {
                warn!("settings patch failed to serialize: {}", err);
                return;
            }
        };
        if items.is_empty() {
            debug!("empty settings patch, nothing to write");
            return;
        }

        if let Err(err) = self.area.write(items).await {
            warn!(
                "settings write to {} area failed: {}",
                self.area.scope(),
                err
            );
        }
    }

    /// Discards the persisted record and reseeds the locale defaults.
    pub async fn reset(&self) -> Settings {
        info!("resetting settings to locale defaults");
        self.heal().await
    }

    /// Registers a callback for durable-area change notifications.
    ///
    /// The registration lives until the returned handle is cancelled or
    /// dropped. Notifications are advisory: a change may describe a write
    /// this process has not yet observed as complete, so callbacks that need
    /// exact values should re-[`load`](Self::load).
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AreaChange) + Send + Sync + 'static,
    {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .lock()
            .unwrap()
            .insert(token, Arc::new(callback));
        debug!("settings subscriber {} registered", token);

        Subscription {
            token,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Feeds a host-reported storage change to the subscribers.
    ///
    /// Only changes from the durable scopes ("sync", "local") are delivered;
    /// everything else is dropped here. Callbacks run outside the registry
    /// lock and may subscribe or cancel from within the notification; a
    /// subscriber cancelled mid-dispatch still sees the change that was
    /// already in flight.
    pub fn notify_area_change(&self, change: &AreaChange) {
        if !change.scope.is_durable() {
            debug!("ignoring change from {} area", change.scope);
            return;
        }

        // Snapshot, then release the lock before invoking anything:
        // subscribe and Subscription::drop take the same lock.
        let callbacks: Vec<ChangeCallback> = {
            let subscribers = self.subscribers.lock().unwrap();
            debug!(
                "dispatching {} changed keys to {} subscribers",
                change.changes.len(),
                subscribers.len()
            );
            subscribers.values().cloned().collect()
        };
        for callback in callbacks {
            callback(change);
        }
    }

    async fn heal(&self) -> Settings {
        let defaults = default_settings(&self.locales);
        self.save(SettingsPatch::from(defaults.clone())).await;
        defaults
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("scope", &self.area.scope())
            .field("locales", &self.locales)
            .finish()
    }
}

/// Cancellation handle for a settings subscription.
///
/// The callback stays registered exactly as long as the handle is alive.
#[must_use = "dropping the subscription cancels it"]
pub struct Subscription {
    token: u64,
    subscribers: Weak<SubscriberMap>,
}

impl Subscription {
    /// Cancels the subscription now instead of at drop time.
    pub fn cancel(self) {
        // Teardown happens in Drop.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.lock().unwrap().remove(&self.token);
            debug!("settings subscriber {} removed", self.token);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("token", &self.token)
            .finish()
    }
}
