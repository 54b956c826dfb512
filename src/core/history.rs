//! Committed transition history.
//!
//! Every coordination change the arbiter commits is appended to the
//! requester's history. Histories are immutable values: `record` returns a
//! new history and leaves the original untouched.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single committed transition.
///
/// `sequence` is the registry-wide commit number, so histories of different
/// members can be merged back into commit order.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// When the commit happened
    pub timestamp: DateTime<Utc>,
    /// Registry-wide commit number, starting at 1
    pub sequence: u64,
}

impl<S: State> StateTransition<S> {
    /// Build a transition stamped with the current time.
    pub fn now(from: S, to: S, sequence: u64) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
            sequence,
        }
    }
}

/// Ordered history of committed transitions.
///
/// # Example
///
/// ```rust
/// use concordat::core::{StateHistory, StateTransition};
/// use concordat::CoordinationState;
///
/// let history = StateHistory::new();
/// let history = history.record(StateTransition::now(
///     CoordinationState::AtRest,
///     CoordinationState::HoldingRunway,
///     1,
/// ));
///
/// assert_eq!(
///     history.get_path(),
///     vec![&CoordinationState::AtRest, &CoordinationState::HoldingRunway]
/// );
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// This is a pure function - it does not mutate the existing history
    /// but returns a new one with the transition added.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed: the first `from`, then the `to`
    /// of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// All transitions in commit order.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
    enum Gate {
        Closed,
        Opening,
        Open,
    }

    impl State for Gate {
        fn name(&self) -> &str {
            match self {
                Self::Closed => "Closed",
                Self::Opening => "Opening",
                Self::Open => "Open",
            }
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<Gate> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(StateTransition::now(Gate::Closed, Gate::Opening, 1));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(StateTransition::now(Gate::Closed, Gate::Opening, 1))
            .record(StateTransition::now(Gate::Opening, Gate::Open, 2));

        assert_eq!(
            history.get_path(),
            vec![&Gate::Closed, &Gate::Opening, &Gate::Open]
        );
        assert_eq!(history.last().map(|t| t.sequence), Some(2));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(StateTransition::now(Gate::Closed, Gate::Open, 7));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<Gate> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.transitions()[0].sequence, 7);
        assert_eq!(deserialized.transitions()[0].to, Gate::Open);
    }
}
