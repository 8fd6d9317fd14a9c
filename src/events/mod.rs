//! Hook dispatch for the transition pipeline.
//!
//! Every `transition_to` call builds one [`TransitionEvent`] and passes it
//! through three hook points in sequence:
//!
//! - [`HookPoint::OnGuard`]: independent checks that may veto
//! - [`HookPoint::PreTransition`]: last validation and side effects before
//!   the state changes; may still veto
//! - [`HookPoint::PostTransition`]: notification after the new state is
//!   committed, ordered by priority
//!
//! The [`EventDispatcher`] trait is the seam for plugging in another
//! publish/subscribe mechanism; [`PriorityDispatcher`] is the default.

mod dispatcher;
mod event;
mod hook;

pub use dispatcher::{EventDispatcher, PriorityDispatcher};
pub use event::{HookPoint, TransitionEvent};
pub use hook::Hook;
