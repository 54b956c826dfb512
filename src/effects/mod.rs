//! The imperative shell around the pure core.
//!
//! Local transitions only *describe* what should happen. This module performs
//! those descriptions against a host environment using Stillwater effects.
//!
//! # Key Concepts
//!
//! - **Console**: capability trait the host implements (speaker, tower radio)
//! - **perform**: turns one [`SideEffect`](crate::SideEffect) into an effect
//! - **dispatch**: handles a command, releases the registry lock, then runs
//!   the resulting side effect
//!
//! Effects never run while the registry lock is held.

mod shell;

pub use shell::{dispatch, perform, Console, ShellError};
