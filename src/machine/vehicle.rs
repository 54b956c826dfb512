//! Two-state vehicle machine: an aircraft parked in a garage or in the air.

use super::SideEffect;
use crate::arbiter::CoordinationState;
use crate::state_enum;
use serde::{Deserialize, Serialize};

state_enum! {
    /// Behavioral state of a vehicle.
    pub enum VehicleState {
        Garage,
        Air,
    }
    idle: [Garage]
}

/// Requests a vehicle can make of the dispatcher.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum VehicleCommand {
    TakeOff,
    Land,
    /// Leave whatever shared resource is held.
    Clear,
}

impl VehicleCommand {
    pub const ALL: &'static [VehicleCommand] = &[Self::TakeOff, Self::Land, Self::Clear];
}

pub fn apply(state: VehicleState, command: VehicleCommand) -> (VehicleState, SideEffect) {
    use VehicleCommand::*;
    use VehicleState::*;

    match (state, command) {
        (Garage, TakeOff) => (Air, SideEffect::Departure),
        (Air, Land) => (Garage, SideEffect::Arrival),
        (state, Clear) => (state, SideEffect::Vacate),
        // already airborne / already down
        (Air, TakeOff) | (Garage, Land) => (state, SideEffect::None),
    }
}

/// Coordination change implied by a vehicle command.
///
/// Taking off occupies the runway, landing occupies the landing strip and
/// clearing returns the vehicle to rest. Inert commands claim nothing.
pub fn claim(
    command: VehicleCommand,
    from: VehicleState,
    next: VehicleState,
) -> Option<CoordinationState> {
    match (command, from, next) {
        (VehicleCommand::TakeOff, VehicleState::Garage, VehicleState::Air) => {
            Some(CoordinationState::HoldingRunway)
        }
        (VehicleCommand::Land, VehicleState::Air, VehicleState::Garage) => {
            Some(CoordinationState::HoldingLandingStrip)
        }
        (VehicleCommand::Clear, _, _) => Some(CoordinationState::AtRest),
        _ => None,
    }
}
