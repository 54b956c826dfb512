//! Builder API for constructing registries.
//!
//! This module provides a fluent builder for seeding a registry and a macro
//! for declaring state enumerations with minimal boilerplate.

pub mod error;
pub mod macros;
pub mod registry;

pub use error::{BuildError, SeedViolation};
pub use registry::RegistryBuilder;

use crate::arbiter::{Arbiter, ConflictTable, CoordinationState};
use crate::machine::VehicleState;

/// The airport from the dispatcher demo: a jet in the air and a helicopter
/// in its garage, both at rest, judged by `conflicts`.
///
/// # Example
///
/// ```
/// use concordat::arbiter::ConflictTable;
/// use concordat::builder::airport;
///
/// let arbiter = airport(ConflictTable::airport()).unwrap();
/// assert_eq!(arbiter.snapshot().members.len(), 2);
/// ```
pub fn airport(conflicts: ConflictTable) -> Result<Arbiter, BuildError> {
    RegistryBuilder::new()
        .conflicts(conflicts)
        .vehicle("boeing-747", VehicleState::Air, CoordinationState::AtRest)
        .vehicle("helicopter", VehicleState::Garage, CoordinationState::AtRest)
        .build_arbiter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityId;

    #[test]
    fn airport_seeds_two_vehicles_at_rest() {
        let snapshot = airport(ConflictTable::shared_strip()).unwrap().snapshot();

        assert_eq!(snapshot.members.len(), 2);
        assert!(snapshot
            .members
            .iter()
            .all(|m| m.coordination_state == CoordinationState::AtRest));
        assert!(snapshot.get(&EntityId::from("helicopter")).is_some());
        assert_eq!(snapshot.conflicts, ConflictTable::shared_strip());
    }
}
