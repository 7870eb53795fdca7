//! Search engine module
//!
//! Defines the fixed engine catalog and a registry for matching URLs to the
//! engines serving them.

mod catalog;
mod registry;

pub use catalog::{all_engines, EngineId, SearchEngine, UnknownEngine};
pub use registry::EngineRegistry;
