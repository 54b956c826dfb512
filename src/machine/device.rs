//! Four-way device machine: a media player with a lock button.

use super::SideEffect;
use crate::arbiter::CoordinationState;
use crate::core::Guard;
use crate::state_enum;
use serde::{Deserialize, Serialize};

/// Default seek distance for a single Next/Previous press while playing.
pub const DEFAULT_SEEK_STEP_SECS: u32 = 5;

state_enum! {
    /// Behavioral state of a device.
    pub enum DeviceState {
        Locked,
        Ready,
        Playing,
    }
    idle: [Ready]
}

/// Buttons a device understands.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum DeviceCommand {
    Lock,
    Play,
    Next,
    Previous,
}

impl DeviceCommand {
    pub const ALL: &'static [DeviceCommand] = &[Self::Lock, Self::Play, Self::Next, Self::Previous];
}

/// Host-owned facts a device consults while transitioning.
///
/// `is_playing` decides where unlocking lands; `double_activation` decides
/// whether Next/Previous skip a track or seek within it.
#[derive(Clone, Debug)]
pub struct Sensors {
    pub is_playing: Guard,
    pub double_activation: Guard,
    pub seek_step: u32,
}

impl Default for Sensors {
    fn default() -> Self {
        Self {
            is_playing: Guard::constant(true),
            double_activation: Guard::constant(true),
            seek_step: DEFAULT_SEEK_STEP_SECS,
        }
    }
}

impl Sensors {
    pub fn with_playing(mut self, guard: Guard) -> Self {
        self.is_playing = guard;
        self
    }

    pub fn with_double_activation(mut self, guard: Guard) -> Self {
        self.double_activation = guard;
        self
    }

    pub fn with_seek_step(mut self, secs: u32) -> Self {
        self.seek_step = secs;
        self
    }
}

/// Apply one button press.
///
/// Every `(state, command)` pair is defined; combinations with nothing to do
/// return the state unchanged with `SideEffect::None`.
pub fn apply(state: DeviceState, command: DeviceCommand, sensors: &Sensors) -> (DeviceState, SideEffect) {
    use DeviceCommand::*;
    use DeviceState::*;

    match (state, command) {
        (Locked, Lock) => {
            if sensors.is_playing.check() {
                (Playing, SideEffect::None)
            } else {
                (Ready, SideEffect::None)
            }
        }
        (Locked, Play | Next | Previous) => (Locked, SideEffect::None),

        (Ready, Lock) => (Locked, SideEffect::None),
        (Ready, Play) => (Playing, SideEffect::StartPlayback),
        (Ready, Next) => (Ready, SideEffect::NextTrack),
        (Ready, Previous) => (Ready, SideEffect::PreviousTrack),

        (Playing, Lock) => (Locked, SideEffect::None),
        (Playing, Play) => (Ready, SideEffect::StopPlayback),
        (Playing, Next) => {
            if sensors.double_activation.check() {
                (Playing, SideEffect::NextTrack)
            } else {
                (
                    Playing,
                    SideEffect::FastForward {
                        secs: sensors.seek_step,
                    },
                )
            }
        }
        (Playing, Previous) => {
            if sensors.double_activation.check() {
                (Playing, SideEffect::PreviousTrack)
            } else {
                (
                    Playing,
                    SideEffect::Rewind {
                        secs: sensors.seek_step,
                    },
                )
            }
        }
    }
}

/// Coordination change implied by moving between two device states.
///
/// Starting playback claims the shared audio output and returning to Ready
/// releases it. Locking a playing device keeps the output.
pub fn claim(from: DeviceState, next: DeviceState) -> Option<CoordinationState> {
    match (from, next) {
        (from, DeviceState::Playing) if from != DeviceState::Playing => {
            Some(CoordinationState::HoldingAudioOutput)
        }
        (from, DeviceState::Ready) if from != DeviceState::Ready => Some(CoordinationState::AtRest),
        _ => None,
    }
}

/// Coordination state a device seeded in `state` must hold.
pub fn seeded_coordination(state: DeviceState) -> CoordinationState {
    match state {
        DeviceState::Playing => CoordinationState::HoldingAudioOutput,
        DeviceState::Locked | DeviceState::Ready => CoordinationState::AtRest,
    }
}

/// Whether a device in `state` may hold `coordination`.
///
/// A playing device always holds the output and a ready one never does.
/// A locked device may keep the output it held while playing.
pub fn admits(state: DeviceState, coordination: CoordinationState) -> bool {
    match state {
        DeviceState::Playing => coordination == CoordinationState::HoldingAudioOutput,
        DeviceState::Ready => coordination == CoordinationState::AtRest,
        DeviceState::Locked => matches!(
            coordination,
            CoordinationState::AtRest | CoordinationState::HoldingAudioOutput
        ),
    }
}
