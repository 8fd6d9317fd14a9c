//! Waypoint: a finite state machine engine with guarded, hookable transitions
//!
//! A [`StateMachine`] drives one subject object through a graph of named
//! states. Every transition runs a fixed pipeline around the single point
//! where the subject's state changes:
//!
//! 1. guards ([`HookPoint::OnGuard`]) may veto
//! 2. pre-transition hooks ([`HookPoint::PreTransition`]) may still veto
//! 3. the new state is committed through the [`StateAccessor`]
//! 4. post-transition hooks ([`HookPoint::PostTransition`]) run by priority
//!
//! A veto is ordinary business logic and comes back as a
//! [`TransitionOutcome`] with `transitioned == false`. Programmer errors,
//! such as an unreachable destination or driving an unbooted machine, are
//! returned as [`MachineError`].
//!
//! # Example
//!
//! ```rust
//! use waypoint::prelude::*;
//!
//! #[derive(Default)]
//! struct Order {
//!     state: Option<String>,
//!     paid: bool,
//! }
//!
//! impl Stateful for Order {
//!     fn state(&self) -> Option<&str> {
//!         self.state.as_deref()
//!     }
//!
//!     fn set_state(&mut self, state: &str) {
//!         self.state = Some(state.to_string());
//!     }
//!
//!     fn attach(&mut self, _machine: MachineId) {}
//! }
//!
//! # fn main() -> waypoint::Result<()> {
//! let mut machine = StateMachine::new(Order::default());
//! machine
//!     .add_state("new", StateType::Initial)?
//!     .add_state("paid", StateType::Normal)?
//!     .add_state("shipped", StateType::Final)?
//!     .add_transition("new", "paid")?
//!     .add_transition("paid", "shipped")?
//!     .add_guard("paid_shipped", |event: &mut TransitionEvent<'_, Order>| {
//!         if event.is_transition("paid_shipped") && !event.subject().paid {
//!             event.add_message("payment not settled");
//!             event.stop_propagation();
//!         }
//!     })?;
//! machine.boot()?;
//!
//! assert!(machine.transition_to("paid")?.is_transitioned());
//!
//! let outcome = machine.transition_to("shipped")?;
//! assert!(!outcome.is_transitioned());
//! assert_eq!(outcome.messages(), ["payment not settled"]);
//! assert_eq!(machine.current_state().unwrap().name(), "paid");
//! # Ok(())
//! # }
//! ```

pub mod checkpoint;
pub mod core;
pub mod events;
pub mod machine;
pub mod subject;

// Re-export commonly used types
pub use checkpoint::{Checkpoint, CheckpointError};
pub use core::{State, StateType, Transition, TransitionHistory, TransitionRecord};
pub use events::{EventDispatcher, Hook, HookPoint, PriorityDispatcher, TransitionEvent};
pub use machine::{
    GraphError, MachineBuilder, MachineConfig, MachineError, Result, StateMachine,
    TransitionOutcome,
};
pub use subject::{FnAccessor, MachineId, StateAccessor, Stateful, SubjectAccessor};

pub mod prelude {
    //! Prelude module for convenient imports
    pub use crate::core::StateType;
    pub use crate::events::{HookPoint, TransitionEvent};
    pub use crate::machine::{MachineError, StateMachine, TransitionOutcome};
    pub use crate::subject::{MachineId, Stateful};
}
