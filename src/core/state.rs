//! Core State trait shared by local and coordination states.
//!
//! Local behavioral states and coordination states are distinct closed
//! enumerations, but both describe a position in some machine and both
//! need stable names for logging and snapshots.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for every state enumeration in the engine.
///
/// All methods are pure. States are small `Copy` values that can be
/// compared bit-for-bit before and after a command.
///
/// # Example
///
/// ```rust
/// use concordat::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Shut,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Shut => "Shut",
///         }
///     }
///
///     fn is_idle(&self) -> bool {
///         matches!(self, Self::Shut)
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// assert!(Door::Shut.is_idle());
/// ```
pub trait State:
    Copy + Eq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name used in logs, diagnostics and snapshots.
    fn name(&self) -> &str;

    /// Whether this state is a resting position: no playback running, no
    /// shared resource held.
    ///
    /// Default implementation returns `false`.
    fn is_idle(&self) -> bool {
        false
    }
}
