//! The handle an actor uses to issue commands.
//!
//! A façade knows only its entity id and the sensors for that entity. The
//! arbiter is passed in on every call; nothing holds a back-reference.

use crate::arbiter::{Arbiter, CoordinationState, Decision};
use crate::core::{EntityId, State};
use crate::error::CoordinationError;
use crate::machine::{self, Command, LocalState, Sensors, SideEffect};
use serde::{Deserialize, Serialize};

/// Outcome of one command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandResult {
    /// The command took effect (possibly as an inert no-op).
    Applied {
        entity: EntityId,
        from: LocalState,
        to: LocalState,
        effect: SideEffect,
        coordination: CoordinationState,
    },
    /// The arbiter refused the resource; nothing changed.
    Declined {
        entity: EntityId,
        local_state: LocalState,
        requested: CoordinationState,
        conflicting: EntityId,
        held: CoordinationState,
    },
}

impl CommandResult {
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::Declined { .. })
    }

    /// Side effect to hand to the host; declines have none.
    pub fn effect(&self) -> SideEffect {
        match self {
            Self::Applied { effect, .. } => *effect,
            Self::Declined { .. } => SideEffect::None,
        }
    }

    /// Local state after the command.
    pub fn local_state(&self) -> LocalState {
        match self {
            Self::Applied { to, .. } => *to,
            Self::Declined { local_state, .. } => *local_state,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EntityFacade {
    id: EntityId,
    sensors: Sensors,
}

impl EntityFacade {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            sensors: Sensors::default(),
        }
    }

    pub fn with_sensors(mut self, sensors: Sensors) -> Self {
        self.sensors = sensors;
        self
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn sensors(&self) -> &Sensors {
        &self.sensors
    }

    /// Apply `command` to this entity.
    ///
    /// The local transition, arbitration and both commits run inside one
    /// critical section. On a decline neither the local nor the
    /// coordination state changes.
    pub fn handle_command(
        &self,
        arbiter: &Arbiter,
        command: Command,
    ) -> Result<CommandResult, CoordinationError> {
        arbiter.transact(|registry| -> Result<CommandResult, CoordinationError> {
            let member = registry.member(&self.id)?;
            let coordination = member.coordination_state();
            let transition =
                machine::apply_local_command(member.local_state(), command, &self.sensors)?;

            let coordination = match transition.claim(command) {
                Some(requested) => {
                    let decision =
                        crate::arbiter::arbitrate(registry, &self.id, requested, transition.next)?;
                    match decision {
                        Decision::Approved { granted, .. } => granted,
                        Decision::Declined {
                            conflicting, held, ..
                        } => {
                            return Ok(CommandResult::Declined {
                                entity: self.id.clone(),
                                local_state: transition.from,
                                requested,
                                conflicting,
                                held,
                            });
                        }
                    }
                }
                None => coordination,
            };

            registry.commit_local(&self.id, transition.next)?;
            tracing::debug!(
                entity = %self.id,
                command = %command,
                from = transition.from.name(),
                to = transition.next.name(),
                effect = %transition.effect,
                "applied command"
            );

            Ok(CommandResult::Applied {
                entity: self.id.clone(),
                from: transition.from,
                to: transition.next,
                effect: transition.effect,
                coordination,
            })
        })
    }
}
