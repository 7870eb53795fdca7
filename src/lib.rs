//! searchswitcher: the engine-switching core of a browser extension
//!
//! Decides which search engine a visited URL belongs to, extracts the active
//! query from it, and keeps the user's engine rotation in schema-validated,
//! self-healing persistent settings. The UI, DOM work, and the messaging
//! transport live in the host extension; this crate only carries the logic.

pub mod engines;
pub mod messaging;
pub mod query;
pub mod settings;
pub mod storage;

pub use engines::{EngineId, EngineRegistry, SearchEngine, UnknownEngine};
pub use messaging::{Message, PageChannel};
pub use query::{CurrentState, QueryResolver};
pub use settings::{Settings, SettingsPatch, SettingsStore, Subscription};
pub use storage::{AreaChange, AreaScope, StorageArea, StorageHost};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
