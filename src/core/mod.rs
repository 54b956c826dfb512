//! Core building blocks shared by every layer.
//!
//! This module contains:
//! - The `State` trait implemented by local and coordination states
//! - Injectable `Guard` predicates for host-owned facts
//! - Immutable history of committed transitions
//! - Entity identities
//!
//! Nothing in this module performs side effects or touches shared state.

mod guard;
mod history;
mod id;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use id::EntityId;
pub use state::State;
