//! Errors raised while building a registry.

use crate::arbiter::{CoordinationState, PairingError};
use crate::core::EntityId;
use crate::error::CoordinationError;
use crate::machine::{EntityKind, LocalState};
use thiserror::Error;

/// A single problem with the seeded population.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SeedViolation {
    #[error("Entity '{0}' is seeded more than once")]
    DuplicateEntity(EntityId),

    #[error("'{first}' ({first_state}) and '{second}' ({second_state}) hold conflicting resources")]
    SeededConflict {
        first: EntityId,
        first_state: CoordinationState,
        second: EntityId,
        second_state: CoordinationState,
    },

    #[error("A {kind} cannot hold '{state}' (entity '{id}')")]
    KindMismatch {
        id: EntityId,
        kind: EntityKind,
        state: CoordinationState,
    },

    #[error("Entity '{id}' is seeded {local_state} but holds '{state}'")]
    StateMismatch {
        id: EntityId,
        local_state: LocalState,
        state: CoordinationState,
    },
}

/// Errors that can occur when building a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Invalid conflict table: {0}")]
    Pairing(#[from] PairingError),

    #[error("Registry seed has {} violation(s)", .0.len())]
    InvalidSeed(Vec<SeedViolation>),

    #[error(transparent)]
    Registration(#[from] CoordinationError),
}
