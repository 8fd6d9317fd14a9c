//! Edges of the machine graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Build the key a transition is stored and addressed under.
///
/// Hooks are attached by this name, so the joining rule is part of the
/// public contract: `{from}_{to}`.
///
/// ```rust
/// use waypoint::core::transition_name;
///
/// assert_eq!(transition_name("new", "paid"), "new_paid");
/// ```
pub fn transition_name(from: &str, to: &str) -> String {
    format!("{from}_{to}")
}

/// A directed edge between two states of the same machine.
///
/// Endpoints are recorded by state name; both existed in the machine's
/// state map when the transition was created.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    name: String,
    from: String,
    to: String,
}

impl Transition {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into();
        let to = to.into();
        Self {
            name: transition_name(&from, &to),
            from,
            to,
        }
    }

    /// Deterministic key, `{from}_{to}`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source state name.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Destination state name.
    pub fn to(&self) -> &str {
        &self.to
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
