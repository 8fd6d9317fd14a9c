//! Core graph types.
//!
//! This module contains the plain data of the state machine:
//! - States tagged as initial, normal or final
//! - Transitions addressed by a deterministic `{from}_{to}` name
//! - The append-only history of committed transitions
//!
//! Nothing here performs I/O or invokes callbacks; the orchestration lives
//! in [`crate::machine`].

mod history;
pub(crate) mod registry;
mod state;
mod transition;

pub use history::{TransitionHistory, TransitionRecord};
pub use state::{State, StateType};
pub use transition::{transition_name, Transition};
