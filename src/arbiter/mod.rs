//! Central arbitration over exclusive shared resources.
//!
//! - [`CoordinationState`] and [`ConflictTable`] define what is exclusive
//! - [`Registry`] holds every entity under arbitration
//! - [`judge`] and [`request_transition`] decide and commit requests
//! - [`Arbiter`] serializes access to a registry shared between threads

mod conflict;
mod decision;
mod handle;
mod registry;

pub use conflict::{ConflictTable, CoordinationState, PairingError};
pub use decision::{judge, request_transition, Decision, TransitionRequest};
pub(crate) use decision::arbitrate;
pub use handle::Arbiter;
pub use registry::{Member, MemberSnapshot, Registry, RegistrySnapshot};
