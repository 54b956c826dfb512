//! Arbitration of coordination-state requests.

use super::conflict::CoordinationState;
use super::registry::Registry;
use crate::core::{EntityId, State};
use crate::error::CoordinationError;
use crate::machine::LocalState;
use serde::{Deserialize, Serialize};

/// A request to move one entity into a coordination state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub requester: EntityId,
    pub requested: CoordinationState,
}

impl TransitionRequest {
    pub fn new(requester: impl Into<EntityId>, requested: CoordinationState) -> Self {
        Self {
            requester: requester.into(),
            requested,
        }
    }
}

/// Outcome of arbitration. Declines are ordinary outcomes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approved {
        requester: EntityId,
        granted: CoordinationState,
    },
    Declined {
        requester: EntityId,
        requested: CoordinationState,
        /// First conflicting member in registration order.
        conflicting: EntityId,
        /// What the conflicting member holds.
        held: CoordinationState,
    },
}

impl Decision {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved { .. })
    }

    pub fn requester(&self) -> &EntityId {
        match self {
            Self::Approved { requester, .. } | Self::Declined { requester, .. } => requester,
        }
    }
}

/// Decide a request against a registry without changing anything.
///
/// The requester is excluded from the scan, so re-requesting a state it
/// already holds is approved. When several members conflict the outcome is
/// the same; only the cited member depends on registration order.
///
/// A state the requester's kind or local state cannot hold is an
/// `Inadmissible` error, never a decision: a device is never granted the
/// runway and a playing device never gives up the output.
pub fn judge(registry: &Registry, request: &TransitionRequest) -> Result<Decision, CoordinationError> {
    let local_state = registry.member(&request.requester)?.local_state();
    judge_as(registry, request, local_state)
}

/// Decide a request as if the requester were already in `local_state`.
///
/// The façade judges the claim of a local transition against the state the
/// transition leads to, before committing either.
pub(crate) fn judge_as(
    registry: &Registry,
    request: &TransitionRequest,
    local_state: LocalState,
) -> Result<Decision, CoordinationError> {
    registry.member(&request.requester)?;

    if !local_state.admits(request.requested) {
        return Err(CoordinationError::Inadmissible {
            entity: request.requester.clone(),
            local_state,
            requested: request.requested,
        });
    }

    Ok(
        match registry.conflicting_holder(&request.requester, request.requested) {
            Some((member, held)) => Decision::Declined {
                requester: request.requester.clone(),
                requested: request.requested,
                conflicting: member.id().clone(),
                held,
            },
            None => Decision::Approved {
                requester: request.requester.clone(),
                granted: request.requested,
            },
        },
    )
}

/// Judge a request and, when approved, commit it to the registry.
///
/// Callers sharing a registry across threads must hold its lock for the
/// whole call; [`super::Arbiter`] does this.
pub fn request_transition(
    registry: &mut Registry,
    requester: &EntityId,
    requested: CoordinationState,
) -> Result<Decision, CoordinationError> {
    let local_state = registry.member(requester)?.local_state();
    arbitrate(registry, requester, requested, local_state)
}

/// [`request_transition`] judged against `local_state` instead of the
/// requester's current local state.
pub(crate) fn arbitrate(
    registry: &mut Registry,
    requester: &EntityId,
    requested: CoordinationState,
    local_state: LocalState,
) -> Result<Decision, CoordinationError> {
    let request = TransitionRequest {
        requester: requester.clone(),
        requested,
    };
    let decision = judge_as(registry, &request, local_state)?;

    match &decision {
        Decision::Approved { granted, .. } => {
            registry.commit_coordination(requester, *granted)?;
            tracing::info!(
                entity = %requester,
                granted = granted.name(),
                "approved coordination request"
            );
        }
        Decision::Declined {
            conflicting, held, ..
        } => {
            tracing::debug!(
                entity = %requester,
                requested = requested.name(),
                conflicting = %conflicting,
                held = held.name(),
                "declined coordination request"
            );
        }
    }

    Ok(decision)
}
