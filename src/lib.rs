//! Concordat: a finite-state coordination engine
//!
//! Concordat composes two layers that must never corrupt each other:
//!
//! - **Local state machines** decide how one entity reacts to a command.
//!   They are pure functions that report side effects as values.
//! - **A central arbiter** grants or declines coordination-state changes
//!   across every registered entity, so an exclusive shared resource is
//!   never held by two entities at once.
//!
//! # Core Concepts
//!
//! - **Entity kinds**: devices (`Locked`/`Ready`/`Playing`) and vehicles
//!   (`Garage`/`Air`), see [`machine`]
//! - **Coordination states**: `AtRest` and the `Holding*` states judged by a
//!   [`ConflictTable`]
//! - **Arbiter**: a lock-guarded handle over the [`Registry`]
//! - **Façade**: [`EntityFacade`] turns user commands into local transitions
//!   and arbitration requests, all-or-nothing
//! - **Shell**: [`effects`] performs reported side effects on the host
//!
//! # Example
//!
//! ```rust
//! use concordat::builder::RegistryBuilder;
//! use concordat::{Command, CommandResult, CoordinationState, EntityFacade, VehicleState};
//!
//! let arbiter = RegistryBuilder::new()
//!     .vehicle("boeing-747", VehicleState::Air, CoordinationState::AtRest)
//!     .vehicle("cessna", VehicleState::Air, CoordinationState::AtRest)
//!     .build_arbiter()
//!     .unwrap();
//!
//! let boeing = EntityFacade::new("boeing-747");
//! let cessna = EntityFacade::new("cessna");
//!
//! let landed = boeing.handle_command(&arbiter, Command::Land).unwrap();
//! assert!(!landed.is_declined());
//!
//! // The landing strip is taken until the boeing clears it.
//! let waiting = cessna.handle_command(&arbiter, Command::Land).unwrap();
//! assert!(matches!(waiting, CommandResult::Declined { .. }));
//!
//! boeing.handle_command(&arbiter, Command::Clear).unwrap();
//! let landed = cessna.handle_command(&arbiter, Command::Land).unwrap();
//! assert!(!landed.is_declined());
//! ```

pub mod arbiter;
pub mod builder;
pub mod core;
pub mod effects;
pub mod error;
pub mod facade;
pub mod machine;

// Re-export commonly used types
pub use arbiter::{Arbiter, ConflictTable, CoordinationState, Decision, Registry};
pub use self::core::{EntityId, Guard, State, StateHistory, StateTransition};
pub use error::CoordinationError;
pub use facade::{CommandResult, EntityFacade};
pub use machine::{
    apply_local_command, Command, DeviceState, EntityKind, LocalState, Sensors, SideEffect,
    VehicleState,
};
