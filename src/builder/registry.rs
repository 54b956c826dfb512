//! Builder for constructing a validated registry.

use crate::arbiter::{Arbiter, ConflictTable, CoordinationState, Registry};
use crate::builder::error::{BuildError, SeedViolation};
use crate::core::EntityId;
use crate::machine::{device, DeviceState, LocalState, VehicleState};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

struct Seed {
    id: EntityId,
    local_state: LocalState,
    coordination_state: CoordinationState,
}

/// Fluent builder for a registry and its starting population.
///
/// `build` checks the whole seed at once and reports every violation it
/// finds rather than stopping at the first.
///
/// # Example
///
/// ```
/// use concordat::builder::RegistryBuilder;
/// use concordat::{CoordinationState, DeviceState, VehicleState};
///
/// let registry = RegistryBuilder::new()
///     .vehicle("boeing-747", VehicleState::Air, CoordinationState::AtRest)
///     .vehicle("helicopter", VehicleState::Garage, CoordinationState::AtRest)
///     .device("walkman", DeviceState::Locked)
///     .build()
///     .unwrap();
///
/// assert_eq!(registry.len(), 3);
/// ```
pub struct RegistryBuilder {
    conflicts: ConflictTable,
    pairs: Vec<(CoordinationState, CoordinationState)>,
    seeds: Vec<Seed>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            conflicts: ConflictTable::airport(),
            pairs: Vec::new(),
            seeds: Vec::new(),
        }
    }

    /// Replace the conflict table (default: [`ConflictTable::airport`]).
    pub fn conflicts(mut self, table: ConflictTable) -> Self {
        self.conflicts = table;
        self
    }

    /// Add a conflict pair on top of the table.
    pub fn pair(mut self, a: CoordinationState, b: CoordinationState) -> Self {
        self.pairs.push((a, b));
        self
    }

    /// Seed a device. Its coordination state follows from its local state.
    pub fn device(self, id: impl Into<EntityId>, state: DeviceState) -> Self {
        let coordination = device::seeded_coordination(state);
        self.member(id, state, coordination)
    }

    pub fn vehicle(
        self,
        id: impl Into<EntityId>,
        state: VehicleState,
        coordination_state: CoordinationState,
    ) -> Self {
        self.member(id, state, coordination_state)
    }

    pub fn member(
        mut self,
        id: impl Into<EntityId>,
        local_state: impl Into<LocalState>,
        coordination_state: CoordinationState,
    ) -> Self {
        self.seeds.push(Seed {
            id: id.into(),
            local_state: local_state.into(),
            coordination_state,
        });
        self
    }

    /// Build the registry.
    /// Fails on the first bad pairing, then on every seed violation at once.
    pub fn build(self) -> Result<Registry, BuildError> {
        let mut conflicts = self.conflicts;
        for (a, b) in self.pairs {
            conflicts.pair(a, b)?;
        }

        if let Validation::Failure(errors) = validate_seeds(&conflicts, &self.seeds) {
            let violations: Vec<SeedViolation> = errors.iter().cloned().collect();
            tracing::debug!(violations = violations.len(), "rejected registry seed");
            return Err(BuildError::InvalidSeed(violations));
        }

        let mut registry = Registry::new(conflicts);
        for seed in self.seeds {
            registry.register(seed.id, seed.local_state, seed.coordination_state)?;
        }
        Ok(registry)
    }

    /// Build the registry and wrap it in a shareable [`Arbiter`].
    pub fn build_arbiter(self) -> Result<Arbiter, BuildError> {
        self.build().map(Arbiter::new)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a seed, accumulating ALL violations.
fn validate_seeds(
    conflicts: &ConflictTable,
    seeds: &[Seed],
) -> Validation<(), NonEmptyVec<SeedViolation>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<SeedViolation>>> = Vec::new();
    let mut seen = HashSet::new();
    let mut unique: Vec<&Seed> = Vec::new();

    for seed in seeds {
        if !seen.insert(&seed.id) {
            checks.push(Validation::fail(SeedViolation::DuplicateEntity(
                seed.id.clone(),
            )));
            continue;
        }

        let kind = seed.local_state.kind();
        if !kind.may_hold(seed.coordination_state) {
            checks.push(Validation::fail(SeedViolation::KindMismatch {
                id: seed.id.clone(),
                kind,
                state: seed.coordination_state,
            }));
        } else if !seed.local_state.admits(seed.coordination_state) {
            checks.push(Validation::fail(SeedViolation::StateMismatch {
                id: seed.id.clone(),
                local_state: seed.local_state,
                state: seed.coordination_state,
            }));
        }
        unique.push(seed);
    }

    for (i, first) in unique.iter().enumerate() {
        for second in &unique[i + 1..] {
            if conflicts.conflicts(first.coordination_state, second.coordination_state) {
                checks.push(Validation::fail(SeedViolation::SeededConflict {
                    first: first.id.clone(),
                    first_state: first.coordination_state,
                    second: second.id.clone(),
                    second_state: second.coordination_state,
                }));
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityId;

    #[test]
    fn empty_builder_builds_empty_registry() {
        let registry = RegistryBuilder::new().build().unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.conflicts(), &ConflictTable::airport());
    }

    #[test]
    fn device_coordination_follows_local_state() {
        let registry = RegistryBuilder::new()
            .device("walkman", DeviceState::Playing)
            .device("radio", DeviceState::Locked)
            .build()
            .unwrap();

        assert_eq!(
            registry
                .get(&EntityId::from("walkman"))
                .unwrap()
                .coordination_state(),
            CoordinationState::HoldingAudioOutput
        );
        assert_eq!(
            registry
                .get(&EntityId::from("radio"))
                .unwrap()
                .coordination_state(),
            CoordinationState::AtRest
        );
    }

    #[test]
    fn build_accumulates_all_violations() {
        let result = RegistryBuilder::new()
            .vehicle("a", VehicleState::Air, CoordinationState::HoldingRunway)
            .vehicle("b", VehicleState::Garage, CoordinationState::HoldingRunway)
            .vehicle("a", VehicleState::Garage, CoordinationState::AtRest)
            .member("c", DeviceState::Ready, CoordinationState::HoldingLandingStrip)
            .build();

        match result {
            Err(BuildError::InvalidSeed(violations)) => {
                assert_eq!(violations.len(), 3);

                assert!(violations
                    .iter()
                    .any(|v| matches!(v, SeedViolation::DuplicateEntity(id) if id.as_str() == "a")));
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, SeedViolation::SeededConflict { .. })));
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, SeedViolation::KindMismatch { .. })));
            }
            other => panic!("Expected seed violations, got {other:?}"),
        }
    }

    #[test]
    fn playing_seed_must_hold_the_output() {
        let result = RegistryBuilder::new()
            .member("walkman", DeviceState::Playing, CoordinationState::AtRest)
            .member("radio", DeviceState::Ready, CoordinationState::HoldingAudioOutput)
            .device("phone", DeviceState::Playing)
            .build();

        match result {
            Err(BuildError::InvalidSeed(violations)) => {
                assert_eq!(violations.len(), 3);
                assert!(violations.contains(&SeedViolation::StateMismatch {
                    id: EntityId::from("walkman"),
                    local_state: LocalState::Device(DeviceState::Playing),
                    state: CoordinationState::AtRest,
                }));
                assert!(violations.contains(&SeedViolation::StateMismatch {
                    id: EntityId::from("radio"),
                    local_state: LocalState::Device(DeviceState::Ready),
                    state: CoordinationState::HoldingAudioOutput,
                }));
                assert!(violations.contains(&SeedViolation::SeededConflict {
                    first: EntityId::from("radio"),
                    first_state: CoordinationState::HoldingAudioOutput,
                    second: EntityId::from("phone"),
                    second_state: CoordinationState::HoldingAudioOutput,
                }));
            }
            other => panic!("Expected seed violations, got {other:?}"),
        }
    }

    #[test]
    fn locked_seed_may_keep_the_output() {
        let registry = RegistryBuilder::new()
            .member("walkman", DeviceState::Locked, CoordinationState::HoldingAudioOutput)
            .build()
            .unwrap();

        assert_eq!(
            registry
                .holders(CoordinationState::HoldingAudioOutput)
                .count(),
            1
        );
    }

    #[test]
    fn shared_strip_rejects_runway_and_strip_holders() {
        let result = RegistryBuilder::new()
            .conflicts(ConflictTable::shared_strip())
            .vehicle("a", VehicleState::Garage, CoordinationState::HoldingRunway)
            .vehicle("b", VehicleState::Air, CoordinationState::HoldingLandingStrip)
            .build();

        assert_eq!(
            result.unwrap_err(),
            BuildError::InvalidSeed(vec![SeedViolation::SeededConflict {
                first: EntityId::from("a"),
                first_state: CoordinationState::HoldingRunway,
                second: EntityId::from("b"),
                second_state: CoordinationState::HoldingLandingStrip,
            }])
        );
    }

    #[test]
    fn bad_pairing_fails_before_seed_checks() {
        let result = RegistryBuilder::new()
            .pair(CoordinationState::HoldingRunway, CoordinationState::HoldingLandingStrip)
            .build();

        assert!(matches!(result, Err(BuildError::Pairing(_))));
    }

    #[test]
    fn custom_table_accepts_extra_pairs() {
        let registry = RegistryBuilder::new()
            .conflicts(ConflictTable::new())
            .pair(CoordinationState::HoldingRunway, CoordinationState::HoldingLandingStrip)
            .build()
            .unwrap();

        assert!(registry.conflicts().conflicts(
            CoordinationState::HoldingLandingStrip,
            CoordinationState::HoldingRunway
        ));
    }
}
