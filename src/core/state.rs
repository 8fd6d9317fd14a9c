//! States of the machine graph.
//!
//! A state is a named node tagged as initial, normal or final. Its outgoing
//! transitions are bound once, when the machine boots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a state plays in the graph.
///
/// A machine holds at most one [`StateType::Initial`] state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateType {
    /// Starting state assigned to subjects that have no persisted state
    Initial,
    /// Ordinary intermediate state
    #[default]
    Normal,
    /// Terminal state
    Final,
}

/// A named node of the state graph.
///
/// The name is immutable after creation. The bound destinations and
/// transition keys are populated by the machine at boot, in lockstep.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{State, StateType};
///
/// let state = State::new("new", StateType::Initial);
///
/// assert_eq!(state.name(), "new");
/// assert!(state.is_initial());
/// assert!(state.transitions().is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    name: String,
    kind: StateType,
    transitions: Vec<String>,
    transition_names: Vec<String>,
}

impl State {
    /// Create an unbound state.
    pub fn new(name: impl Into<String>, kind: StateType) -> Self {
        Self {
            name: name.into(),
            kind,
            transitions: Vec::new(),
            transition_names: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> StateType {
        self.kind
    }

    pub fn is_initial(&self) -> bool {
        self.kind == StateType::Initial
    }

    pub fn is_normal(&self) -> bool {
        self.kind == StateType::Normal
    }

    pub fn is_final(&self) -> bool {
        self.kind == StateType::Final
    }

    /// Destination state names reachable from this state.
    ///
    /// Empty until the machine boots.
    pub fn transitions(&self) -> &[String] {
        &self.transitions
    }

    /// Keys of the transitions realizing [`State::transitions`], same order.
    pub fn transition_names(&self) -> &[String] {
        &self.transition_names
    }

    /// Check whether `destination` is among the bound destinations.
    pub fn leads_to(&self, destination: &str) -> bool {
        self.transitions.iter().any(|name| name == destination)
    }

    pub(crate) fn bind(&mut self, transitions: Vec<String>, transition_names: Vec<String>) {
        debug_assert_eq!(transitions.len(), transition_names.len());
        self.transitions = transitions;
        self.transition_names = transition_names;
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
