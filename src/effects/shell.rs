//! Performing side effects against a host console.

use crate::arbiter::Arbiter;
use crate::error::CoordinationError;
use crate::facade::{CommandResult, EntityFacade};
use crate::machine::{Command, SideEffect};
use stillwater::effect::{BoxedEffect, Effect};
use stillwater::prelude::*;

/// Host capabilities a side effect may need.
///
/// Methods take `&self`; hosts with mutable devices use interior mutability.
pub trait Console {
    fn start_playback(&self) -> Result<(), String>;
    fn stop_playback(&self) -> Result<(), String>;
    fn next_track(&self) -> Result<(), String>;
    fn previous_track(&self) -> Result<(), String>;
    fn fast_forward(&self, secs: u32) -> Result<(), String>;
    fn rewind(&self, secs: u32) -> Result<(), String>;

    /// Broadcast a dispatcher message (departures, arrivals, clearances).
    fn announce(&self, message: &str) -> Result<(), String>;
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ShellError {
    #[error("Host failed to {effect}: {reason}")]
    HostFailed { effect: SideEffect, reason: String },

    #[error(transparent)]
    Coordination(#[from] CoordinationError),
}

/// Build the effect that carries out `effect` on the host.
///
/// The effect yields the side effect it performed. `SideEffect::None`
/// performs nothing.
pub fn perform<Env>(effect: SideEffect) -> BoxedEffect<SideEffect, ShellError, Env>
where
    Env: Console + Clone + Send + Sync + 'static,
{
    if effect.is_none() {
        return pure(effect).boxed();
    }

    from_fn(move |env: &Env| {
        let outcome = match effect {
            SideEffect::None => Ok(()),
            SideEffect::StartPlayback => env.start_playback(),
            SideEffect::StopPlayback => env.stop_playback(),
            SideEffect::NextTrack => env.next_track(),
            SideEffect::PreviousTrack => env.previous_track(),
            SideEffect::FastForward { secs } => env.fast_forward(secs),
            SideEffect::Rewind { secs } => env.rewind(secs),
            SideEffect::Departure | SideEffect::Arrival | SideEffect::Vacate => {
                env.announce(&effect.to_string())
            }
        };

        outcome
            .map(|()| effect)
            .map_err(|reason| ShellError::HostFailed { effect, reason })
    })
    .boxed()
}

/// Handle `command` and then perform its side effect on `env`.
///
/// The registry lock is released before the effect runs, so a slow host
/// never blocks arbitration for other entities.
pub async fn dispatch<Env>(
    facade: &EntityFacade,
    arbiter: &Arbiter,
    command: Command,
    env: &Env,
) -> Result<CommandResult, ShellError>
where
    Env: Console + Clone + Send + Sync + 'static,
{
    let result = facade.handle_command(arbiter, command)?;
    perform::<Env>(result.effect()).run(env).await?;
    Ok(result)
}
