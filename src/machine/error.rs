//! Errors raised by state machine operations.
//!
//! All of them signal programmer or configuration mistakes. A failed call
//! leaves the machine unchanged. A guard or pre-transition veto is not an
//! error; see [`crate::machine::TransitionOutcome`].

use crate::checkpoint::CheckpointError;
use thiserror::Error;

/// Result alias for state machine operations.
pub type Result<T, E = MachineError> = std::result::Result<T, E>;

/// Malformed state/transition graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Statemachine cannot have more than one initial state, current initial state is ({current})")]
    DuplicateInitialState { current: String },

    #[error("State with name: {name} is not found, states available are: {available}")]
    UnknownState { name: String, available: String },

    #[error("Transition name ({name}) for ({from}) to ({to}) is already used by ({existing_from}) to ({existing_to})")]
    TransitionNameCollision {
        name: String,
        from: String,
        to: String,
        existing_from: String,
        existing_to: String,
    },

    #[error("Cannot {operation} on a booted StateMachine")]
    MachineBooted { operation: &'static str },
}

/// Errors that can occur when building, booting or driving a machine.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Transition ({name}) is not found, allowed transitions [{available}]")]
    UnknownTransition { name: String, available: String },

    #[error("Statemachine is already booted")]
    AlreadyBooted,

    #[error("Cannot boot StateMachine without subject, bind one before boot()")]
    MissingSubject,

    #[error("StateMachine expected subject of type {expected} instead of {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("No initial state is found")]
    NoInitialState,

    #[error("Subject is in state ({name}) which is not part of the StateMachine")]
    UnknownCurrentState { name: String },

    #[error("Statemachine is not booted")]
    NotBooted,

    #[error("There's no transition defined from ({from}) to ({to}), allowed transitions to : [ {} ]", .allowed.join(","))]
    IllegalTransition {
        from: String,
        to: String,
        allowed: Vec<String>,
    },

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}

impl MachineError {
    /// Check whether this error reports a malformed graph.
    pub fn is_graph_error(&self) -> bool {
        matches!(self, Self::Graph(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_transition_lists_allowed_destinations() {
        let error = MachineError::IllegalTransition {
            from: "shipped".to_string(),
            to: "new".to_string(),
            allowed: vec!["delivered".to_string(), "returned".to_string()],
        };

        assert_eq!(
            error.to_string(),
            "There's no transition defined from (shipped) to (new), allowed transitions to : [ delivered,returned ]"
        );
    }

    #[test]
    fn graph_errors_convert_into_machine_errors() {
        let error: MachineError = GraphError::MachineBooted {
            operation: "add state",
        }
        .into();

        assert!(error.is_graph_error());
        assert_eq!(error.to_string(), "Cannot add state on a booted StateMachine");
        assert!(!MachineError::NotBooted.is_graph_error());
    }
}
