//! Subjects driven by a state machine.
//!
//! A subject is the externally owned object whose lifecycle a machine
//! drives. It keeps its own current-state name, read and written through a
//! [`StateAccessor`], and is told which machine drives it through a
//! non-owning [`MachineId`] handle.

mod accessor;

pub use accessor::{FnAccessor, StateAccessor, SubjectAccessor};

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a state machine instance.
///
/// Subjects hold this instead of a reference to their machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MachineId(Uuid);

impl MachineId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MachineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for MachineId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Trait for objects whose lifecycle a state machine drives.
///
/// # Example
///
/// ```rust
/// use waypoint::subject::{MachineId, Stateful};
///
/// #[derive(Default)]
/// struct Order {
///     state: Option<String>,
///     machine: Option<MachineId>,
/// }
///
/// impl Stateful for Order {
///     fn state(&self) -> Option<&str> {
///         self.state.as_deref()
///     }
///
///     fn set_state(&mut self, state: &str) {
///         self.state = Some(state.to_string());
///     }
///
///     fn attach(&mut self, machine: MachineId) {
///         self.machine = Some(machine);
///     }
/// }
///
/// let order = Order::default();
/// assert!(order.type_tag().ends_with("Order"));
/// ```
pub trait Stateful {
    /// Persisted current-state name, `None` for a fresh subject.
    fn state(&self) -> Option<&str>;

    /// Persist a new current-state name.
    fn set_state(&mut self, state: &str);

    /// Called once when the subject is bound to a machine.
    fn attach(&mut self, machine: MachineId);

    /// Concrete type reported for the boot-time type check.
    fn type_tag(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machine_ids_are_unique() {
        assert_ne!(MachineId::new(), MachineId::new());
    }

    #[test]
    fn machine_id_displays_as_uuid() {
        let uuid = Uuid::new_v4();
        let id = MachineId::from(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn machine_id_round_trips_through_json() {
        let id = MachineId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: MachineId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
