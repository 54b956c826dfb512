//! Coordination states and the conflict table that arbitrates them.

use crate::core::State;
use crate::state_enum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

state_enum! {
    /// Shared-resource state of an entity, as seen by the arbiter.
    pub enum CoordinationState {
        AtRest,
        HoldingRunway,
        HoldingLandingStrip,
        HoldingAudioOutput,
    }
    idle: [AtRest]
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PairingError {
    #[error("'{state}' is already paired with '{existing}'")]
    AlreadyPaired {
        state: CoordinationState,
        existing: CoordinationState,
    },

    #[error("'{0}' holds no resource and cannot conflict")]
    IdleState(CoordinationState),
}

/// Symmetric map from each exclusive coordination state to its single
/// conflict partner.
///
/// A state may be its own partner, meaning the resource admits one holder.
/// States with no entry never conflict with anything.
///
/// # Example
///
/// ```rust
/// use concordat::arbiter::{ConflictTable, CoordinationState};
///
/// let table = ConflictTable::shared_strip();
/// assert_eq!(
///     table.partner(CoordinationState::HoldingRunway),
///     Some(CoordinationState::HoldingLandingStrip)
/// );
/// assert_eq!(table.partner(CoordinationState::AtRest), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictTable {
    pairs: Vec<(CoordinationState, CoordinationState)>,
}

impl ConflictTable {
    /// An empty table: nothing conflicts.
    pub fn new() -> Self {
        Self::default()
    }

    /// One holder per resource: the runway, the landing strip and the audio
    /// output are each exclusive on their own.
    pub fn airport() -> Self {
        Self {
            pairs: vec![
                (CoordinationState::HoldingRunway, CoordinationState::HoldingRunway),
                (
                    CoordinationState::HoldingLandingStrip,
                    CoordinationState::HoldingLandingStrip,
                ),
                (
                    CoordinationState::HoldingAudioOutput,
                    CoordinationState::HoldingAudioOutput,
                ),
            ],
        }
    }

    /// Take-off and landing share one physical strip: holding the runway
    /// excludes anyone landing, and the reverse.
    ///
    /// Each state has a single partner, so pairing the runway with the
    /// strip costs both their self-exclusion. Under this table two vehicles
    /// may hold the runway at once, as may two on the strip. Use
    /// [`ConflictTable::airport`] when each resource must have one holder.
    pub fn shared_strip() -> Self {
        Self {
            pairs: vec![
                (
                    CoordinationState::HoldingRunway,
                    CoordinationState::HoldingLandingStrip,
                ),
                (
                    CoordinationState::HoldingAudioOutput,
                    CoordinationState::HoldingAudioOutput,
                ),
            ],
        }
    }

    /// Declare `a` and `b` conflict partners.
    ///
    /// Re-declaring an existing pair is accepted. Giving a state a second,
    /// different partner is rejected.
    pub fn pair(&mut self, a: CoordinationState, b: CoordinationState) -> Result<(), PairingError> {
        for state in [a, b] {
            if state.is_idle() {
                return Err(PairingError::IdleState(state));
            }
        }

        match (self.partner(a), self.partner(b)) {
            (Some(existing), _) if existing != b => Err(PairingError::AlreadyPaired {
                state: a,
                existing,
            }),
            (_, Some(existing)) if existing != a => Err(PairingError::AlreadyPaired {
                state: b,
                existing,
            }),
            (Some(_), _) => Ok(()),
            _ => {
                self.pairs.push((a, b));
                Ok(())
            }
        }
    }

    /// The state that conflicts with `state`, if it is exclusive.
    pub fn partner(&self, state: CoordinationState) -> Option<CoordinationState> {
        self.pairs.iter().find_map(|&(a, b)| {
            if a == state {
                Some(b)
            } else if b == state {
                Some(a)
            } else {
                None
            }
        })
    }

    pub fn conflicts(&self, a: CoordinationState, b: CoordinationState) -> bool {
        self.partner(a) == Some(b)
    }

    pub fn is_exclusive(&self, state: CoordinationState) -> bool {
        self.partner(state).is_some()
    }

    pub fn pairs(&self) -> &[(CoordinationState, CoordinationState)] {
        &self.pairs
    }
}
