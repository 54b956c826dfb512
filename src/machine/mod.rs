//! Per-entity local state machines.
//!
//! Each entity kind has a closed set of behavioral states and a pure
//! transition function. The functions here never look at other entities
//! and never perform side effects: what should happen is reported as a
//! [`SideEffect`] value for the caller to act on.

pub mod device;
pub mod vehicle;

pub use device::{DeviceCommand, DeviceState, Sensors};
pub use vehicle::{VehicleCommand, VehicleState};

use crate::arbiter::CoordinationState;
use crate::core::State;
use crate::error::CoordinationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of entity kinds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum EntityKind {
    Device,
    Vehicle,
}

impl EntityKind {
    /// Whether an entity of this kind can ever hold `state`.
    pub fn may_hold(self, state: CoordinationState) -> bool {
        match (self, state) {
            (_, CoordinationState::AtRest) => true,
            (Self::Device, CoordinationState::HoldingAudioOutput) => true,
            (
                Self::Vehicle,
                CoordinationState::HoldingRunway | CoordinationState::HoldingLandingStrip,
            ) => true,
            _ => false,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device => f.write_str("device"),
            Self::Vehicle => f.write_str("vehicle"),
        }
    }
}

/// Behavioral state of any entity, tagged by kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", content = "state")]
pub enum LocalState {
    Device(DeviceState),
    Vehicle(VehicleState),
}

impl LocalState {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Device(_) => EntityKind::Device,
            Self::Vehicle(_) => EntityKind::Vehicle,
        }
    }

    /// Whether an entity in this state may hold `coordination`.
    ///
    /// Stricter than [`EntityKind::may_hold`]: a device's output follows
    /// whether it is playing.
    pub fn admits(&self, coordination: CoordinationState) -> bool {
        match self {
            Self::Device(state) => device::admits(*state, coordination),
            Self::Vehicle(_) => EntityKind::Vehicle.may_hold(coordination),
        }
    }
}

impl fmt::Display for LocalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.name())
    }
}

impl State for LocalState {
    fn name(&self) -> &str {
        match self {
            Self::Device(state) => state.name(),
            Self::Vehicle(state) => state.name(),
        }
    }

    fn is_idle(&self) -> bool {
        match self {
            Self::Device(state) => state.is_idle(),
            Self::Vehicle(state) => state.is_idle(),
        }
    }
}

impl From<DeviceState> for LocalState {
    fn from(state: DeviceState) -> Self {
        Self::Device(state)
    }
}

impl From<VehicleState> for LocalState {
    fn from(state: VehicleState) -> Self {
        Self::Vehicle(state)
    }
}

/// User-facing command, before it is checked against an entity kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Command {
    Lock,
    Play,
    Next,
    Previous,
    TakeOff,
    Land,
    Clear,
}

impl Command {
    pub const ALL: &'static [Command] = &[
        Self::Lock,
        Self::Play,
        Self::Next,
        Self::Previous,
        Self::TakeOff,
        Self::Land,
        Self::Clear,
    ];

    pub fn as_device(self) -> Option<DeviceCommand> {
        match self {
            Self::Lock => Some(DeviceCommand::Lock),
            Self::Play => Some(DeviceCommand::Play),
            Self::Next => Some(DeviceCommand::Next),
            Self::Previous => Some(DeviceCommand::Previous),
            Self::TakeOff | Self::Land | Self::Clear => None,
        }
    }

    pub fn as_vehicle(self) -> Option<VehicleCommand> {
        match self {
            Self::TakeOff => Some(VehicleCommand::TakeOff),
            Self::Land => Some(VehicleCommand::Land),
            Self::Clear => Some(VehicleCommand::Clear),
            Self::Lock | Self::Play | Self::Next | Self::Previous => None,
        }
    }

    /// Whether `kind` understands this command at all.
    pub fn applies_to(self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Device => self.as_device().is_some(),
            EntityKind::Vehicle => self.as_vehicle().is_some(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Lock => "lock",
            Self::Play => "play",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::TakeOff => "take off",
            Self::Land => "land",
            Self::Clear => "clear",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown command '{0}'")]
pub struct ParseCommandError(pub String);

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "lock" | "unlock" => Ok(Self::Lock),
            "play" | "pause" => Ok(Self::Play),
            "next" => Ok(Self::Next),
            "previous" | "prev" => Ok(Self::Previous),
            "take off" | "takeoff" => Ok(Self::TakeOff),
            "land" => Ok(Self::Land),
            "clear" => Ok(Self::Clear),
            _ => Err(ParseCommandError(s.to_string())),
        }
    }
}

/// What a local transition asks the host to do.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SideEffect {
    None,
    StartPlayback,
    StopPlayback,
    NextTrack,
    PreviousTrack,
    FastForward { secs: u32 },
    Rewind { secs: u32 },
    Departure,
    Arrival,
    Vacate,
}

impl SideEffect {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for SideEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("no effect"),
            Self::StartPlayback => f.write_str("start playback"),
            Self::StopPlayback => f.write_str("stop playback"),
            Self::NextTrack => f.write_str("advance to next track"),
            Self::PreviousTrack => f.write_str("return to previous track"),
            Self::FastForward { secs } => write!(f, "fast forward {secs}s"),
            Self::Rewind { secs } => write!(f, "rewind {secs}s"),
            Self::Departure => f.write_str("depart"),
            Self::Arrival => f.write_str("arrive"),
            Self::Vacate => f.write_str("vacate shared resource"),
        }
    }
}

/// Result of applying a command to a local state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LocalTransition {
    pub from: LocalState,
    pub next: LocalState,
    pub effect: SideEffect,
}

impl LocalTransition {
    /// Coordination state this transition needs the arbiter to grant, if any.
    pub fn claim(&self, command: Command) -> Option<CoordinationState> {
        match (self.from, self.next) {
            (LocalState::Device(from), LocalState::Device(next)) => device::claim(from, next),
            (LocalState::Vehicle(from), LocalState::Vehicle(next)) => command
                .as_vehicle()
                .and_then(|command| vehicle::claim(command, from, next)),
            _ => None,
        }
    }
}

/// Apply `command` to `state`.
///
/// Fails only when the command does not belong to the entity's kind; every
/// pair inside a kind's own table yields a transition, possibly inert.
pub fn apply_local_command(
    state: LocalState,
    command: Command,
    sensors: &Sensors,
) -> Result<LocalTransition, CoordinationError> {
    let invalid = || CoordinationError::InvalidCommand {
        command,
        kind: state.kind(),
    };

    let (next, effect) = match state {
        LocalState::Device(current) => {
            let command = command.as_device().ok_or_else(invalid)?;
            let (next, effect) = device::apply(current, command, sensors);
            (LocalState::Device(next), effect)
        }
        LocalState::Vehicle(current) => {
            let command = command.as_vehicle().ok_or_else(invalid)?;
            let (next, effect) = vehicle::apply(current, command);
            (LocalState::Vehicle(next), effect)
        }
    };

    Ok(LocalTransition {
        from: state,
        next,
        effect,
    })
}
