//! Injectable predicates consulted by local transitions.
//!
//! Some transitions branch on facts the state machine does not own, such as
//! whether the host player is still producing audio. Those facts reach the
//! machine as guards supplied by the host, never as hard-coded answers.

use std::fmt;
use std::sync::Arc;

/// Host-supplied predicate that selects between two transition branches.
///
/// Guards are cheap to clone and thread-safe, so the same sensor can be
/// shared between a façade and the host that owns the underlying fact.
///
/// # Example
///
/// ```rust
/// use concordat::core::Guard;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let playing = Arc::new(AtomicBool::new(false));
/// let probe = Arc::clone(&playing);
/// let guard = Guard::new(move || probe.load(Ordering::SeqCst));
///
/// assert!(!guard.check());
/// playing.store(true, Ordering::SeqCst);
/// assert!(guard.check());
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a predicate owned by the host.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// A guard that always answers `value`.
    ///
    /// ```rust
    /// use concordat::core::Guard;
    ///
    /// assert!(Guard::constant(true).check());
    /// assert!(!Guard::constant(false).check());
    /// ```
    pub fn constant(value: bool) -> Self {
        Self::new(move || value)
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
