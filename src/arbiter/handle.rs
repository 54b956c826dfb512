//! Thread-safe handle onto one registry.

use super::conflict::CoordinationState;
use super::decision::{self, Decision};
use super::registry::{Registry, RegistrySnapshot};
use crate::core::EntityId;
use crate::error::CoordinationError;
use crate::machine::LocalState;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle that serializes all access to a registry.
///
/// The handle owns nothing but the lock. Each method takes the lock once
/// and runs its scan, decision and commit before releasing it, so two
/// requests can never both see "no conflict" and both commit.
#[derive(Clone, Debug)]
pub struct Arbiter {
    registry: Arc<Mutex<Registry>>,
}

impl Arbiter {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
        }
    }

    /// Register an entity after start-up, judged against the current
    /// holders under the same lock. See [`Registry::register`].
    pub fn register(
        &self,
        id: impl Into<EntityId>,
        local_state: impl Into<LocalState>,
        coordination_state: CoordinationState,
    ) -> Result<(), CoordinationError> {
        self.registry
            .lock()
            .register(id, local_state, coordination_state)
    }

    pub fn request_transition(
        &self,
        requester: &EntityId,
        requested: CoordinationState,
    ) -> Result<Decision, CoordinationError> {
        let mut registry = self.registry.lock();
        decision::request_transition(&mut registry, requester, requested)
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        self.registry.lock().snapshot()
    }

    /// Read the registry under the lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        f(&self.registry.lock())
    }

    /// Run `f` as one critical section with write access.
    pub(crate) fn transact<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        f(&mut self.registry.lock())
    }
}

impl From<Registry> for Arbiter {
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}
