//! The shared-resource registry: every entity under arbitration.

use super::conflict::{ConflictTable, CoordinationState};
use crate::core::{EntityId, StateHistory, StateTransition};
use crate::error::CoordinationError;
use crate::machine::{EntityKind, LocalState};
use serde::{Deserialize, Serialize};

/// One registered entity.
///
/// Fields are private: the coordination state is written only by the
/// arbiter's commit and the local state only by the façade's commit.
#[derive(Clone, Debug)]
pub struct Member {
    id: EntityId,
    local_state: LocalState,
    coordination_state: CoordinationState,
    history: StateHistory<CoordinationState>,
}

impl Member {
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.local_state.kind()
    }

    pub fn local_state(&self) -> LocalState {
        self.local_state
    }

    pub fn coordination_state(&self) -> CoordinationState {
        self.coordination_state
    }

    /// Committed coordination changes, oldest first.
    pub fn history(&self) -> &StateHistory<CoordinationState> {
        &self.history
    }
}

/// Ordered, grow-only set of members plus the conflict table they are
/// judged by.
#[derive(Clone, Debug)]
pub struct Registry {
    members: Vec<Member>,
    conflicts: ConflictTable,
    commits: u64,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(ConflictTable::airport())
    }
}

impl Registry {
    pub fn new(conflicts: ConflictTable) -> Self {
        Self {
            members: Vec::new(),
            conflicts,
            commits: 0,
        }
    }

    /// Add an entity. Registration order is scan order.
    ///
    /// A newcomer is judged like any request: it may only bring a
    /// coordination state its local state admits and that no current
    /// member holds the partner of. Rejected registrations change nothing.
    pub fn register(
        &mut self,
        id: impl Into<EntityId>,
        local_state: impl Into<LocalState>,
        coordination_state: CoordinationState,
    ) -> Result<(), CoordinationError> {
        let id = id.into();
        if self.contains(&id) {
            return Err(CoordinationError::DuplicateEntity(id));
        }

        let local_state = local_state.into();
        if !local_state.admits(coordination_state) {
            return Err(CoordinationError::Inadmissible {
                entity: id,
                local_state,
                requested: coordination_state,
            });
        }
        if let Some((holder, held)) = self.conflicting_holder(&id, coordination_state) {
            return Err(CoordinationError::RegistrationConflict {
                entity: id.clone(),
                requested: coordination_state,
                conflicting: holder.id.clone(),
                held,
            });
        }

        tracing::debug!(
            entity = %id,
            kind = %local_state.kind(),
            coordination = %coordination_state,
            "registered entity"
        );

        self.members.push(Member {
            id,
            local_state,
            coordination_state,
            history: StateHistory::new(),
        });
        Ok(())
    }

    pub fn conflicts(&self) -> &ConflictTable {
        &self.conflicts
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &EntityId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    /// Look up a member, failing with `UnregisteredEntity`.
    pub fn member(&self, id: &EntityId) -> Result<&Member, CoordinationError> {
        self.get(id)
            .ok_or_else(|| CoordinationError::UnregisteredEntity(id.clone()))
    }

    /// Members currently holding `state`, in registration order.
    pub fn holders(&self, state: CoordinationState) -> impl Iterator<Item = &Member> {
        self.members
            .iter()
            .filter(move |m| m.coordination_state == state)
    }

    /// First member other than `requester`, in registration order, holding
    /// the conflict partner of `state`, with the state it holds.
    pub fn conflicting_holder(
        &self,
        requester: &EntityId,
        state: CoordinationState,
    ) -> Option<(&Member, CoordinationState)> {
        let partner = self.conflicts.partner(state)?;
        self.members
            .iter()
            .filter(|m| &m.id != requester)
            .find(|m| m.coordination_state == partner)
            .map(|m| (m, partner))
    }

    /// Total coordination changes committed so far.
    pub fn commits(&self) -> u64 {
        self.commits
    }

    fn position(&self, id: &EntityId) -> Option<usize> {
        self.members.iter().position(|m| &m.id == id)
    }

    fn member_mut(&mut self, id: &EntityId) -> Result<&mut Member, CoordinationError> {
        match self.position(id) {
            Some(index) => Ok(&mut self.members[index]),
            None => Err(CoordinationError::UnregisteredEntity(id.clone())),
        }
    }

    /// Write a granted coordination state. Only the arbiter calls this.
    pub(crate) fn commit_coordination(
        &mut self,
        id: &EntityId,
        to: CoordinationState,
    ) -> Result<(), CoordinationError> {
        let sequence = self.commits + 1;
        let member = self.member_mut(id)?;
        let from = member.coordination_state;
        if from == to {
            return Ok(());
        }

        member.coordination_state = to;
        member.history = member
            .history
            .record(StateTransition::now(from, to, sequence));
        self.commits = sequence;
        Ok(())
    }

    /// Write a new local state. Only the façade calls this.
    pub(crate) fn commit_local(
        &mut self,
        id: &EntityId,
        to: LocalState,
    ) -> Result<(), CoordinationError> {
        self.member_mut(id)?.local_state = to;
        Ok(())
    }

    /// Serializable view of the current states, for rendering.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            members: self
                .members
                .iter()
                .map(|m| MemberSnapshot {
                    id: m.id.clone(),
                    local_state: m.local_state,
                    coordination_state: m.coordination_state,
                })
                .collect(),
            conflicts: self.conflicts.clone(),
            commits: self.commits,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub id: EntityId,
    pub local_state: LocalState,
    pub coordination_state: CoordinationState,
}

/// Point-in-time copy of a registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub members: Vec<MemberSnapshot>,
    pub conflicts: ConflictTable,
    pub commits: u64,
}

impl RegistrySnapshot {
    pub fn get(&self, id: &EntityId) -> Option<&MemberSnapshot> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
