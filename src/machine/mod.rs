//! The state machine orchestrator.
//!
//! # Lifecycle
//!
//! 1. Build: add states, then transitions, then hooks
//! 2. [`StateMachine::boot`] once
//! 3. Drive the subject with [`StateMachine::transition_to`]
//!
//! Graph operations are only permitted before boot; transitions and
//! introspection only after.

mod builder;
mod config;
mod error;
#[allow(clippy::module_inception)]
mod machine;

pub use builder::MachineBuilder;
pub use config::MachineConfig;
pub use error::{GraphError, MachineError, Result};
pub use machine::{StateMachine, TransitionOutcome};
