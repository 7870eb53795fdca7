//! Query resolution and engine rotation
//!
//! Extracts the active search text from a visited URL using the matched
//! engine's parameter conventions, and derives the transient per-navigation
//! state that drives switching.

mod resolver;
mod rotation;

pub use resolver::{extract_query, QueryResolver};
pub use rotation::{next_in_rotation, CurrentState};
