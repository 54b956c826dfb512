//! Errors raised by commands and arbitration.
//!
//! A declined arbitration is not an error; see [`crate::arbiter::Decision`].

use crate::arbiter::CoordinationState;
use crate::core::EntityId;
use crate::machine::{Command, EntityKind, LocalState};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoordinationError {
    #[error("Command '{command}' is not understood by a {kind}")]
    InvalidCommand { command: Command, kind: EntityKind },

    #[error("Entity '{0}' is not registered with the arbiter")]
    UnregisteredEntity(EntityId),

    #[error("Entity '{0}' is already registered")]
    DuplicateEntity(EntityId),

    /// The requested coordination state contradicts the entity's kind or
    /// local state, e.g. a device on the runway or a playing device at rest.
    #[error("Entity '{entity}' ({local_state}) cannot hold '{requested}'")]
    Inadmissible {
        entity: EntityId,
        local_state: LocalState,
        requested: CoordinationState,
    },

    /// A late registration would share an exclusive resource.
    #[error("Entity '{entity}' cannot join holding '{requested}': '{conflicting}' holds '{held}'")]
    RegistrationConflict {
        entity: EntityId,
        requested: CoordinationState,
        conflicting: EntityId,
        held: CoordinationState,
    },
}
