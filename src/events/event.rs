//! The context object passed through every hook of a transition.

use crate::core::Transition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named stage of the transition pipeline where hooks attach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HookPoint {
    /// Guards, run first; may veto before anything changes
    OnGuard,
    /// Pre-transition hooks; may still veto
    PreTransition,
    /// Post-transition hooks, run after the new state is committed
    PostTransition,
}

impl HookPoint {
    /// Stable event name of this hook point.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnGuard => "statemachine.on_guard",
            Self::PreTransition => "statemachine.pre_transition",
            Self::PostTransition => "statemachine.post_transition",
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable context for a single `transition_to` call.
///
/// Created fresh per call and handed to every hook in turn. Hooks see the
/// subject and the transition in flight, can stop propagation and can
/// append messages for the caller.
///
/// Hooks at a hook point are broadcast: every hook registered there runs
/// for every transition, so a hook meant for one transition checks
/// [`TransitionEvent::transition`] itself.
pub struct TransitionEvent<'a, T> {
    subject: &'a mut T,
    transition: &'a Transition,
    stopped: bool,
    messages: Vec<String>,
}

impl<'a, T> TransitionEvent<'a, T> {
    pub fn new(subject: &'a mut T, transition: &'a Transition) -> Self {
        Self {
            subject,
            transition,
            stopped: false,
            messages: Vec::new(),
        }
    }

    pub fn subject(&self) -> &T {
        self.subject
    }

    pub fn subject_mut(&mut self) -> &mut T {
        self.subject
    }

    pub fn transition(&self) -> &Transition {
        self.transition
    }

    /// Check whether the transition in flight has the given name.
    pub fn is_transition(&self, name: &str) -> bool {
        self.transition.name() == name
    }

    /// Abort the remaining hooks at this stage.
    ///
    /// During guard and pre-transition stages this also aborts the
    /// transition itself.
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl<T> fmt::Debug for TransitionEvent<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionEvent")
            .field("transition", &self.transition.name())
            .field("stopped", &self.stopped)
            .field("messages", &self.messages)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_is_not_stopped() {
        let mut subject = 0u32;
        let transition = Transition::new("new", "paid");
        let event = TransitionEvent::new(&mut subject, &transition);

        assert!(!event.is_propagation_stopped());
        assert!(event.messages().is_empty());
        assert!(event.is_transition("new_paid"));
        assert!(!event.is_transition("paid_shipped"));
    }

    #[test]
    fn stop_and_messages_accumulate() {
        let mut subject = 0u32;
        let transition = Transition::new("new", "paid");
        let mut event = TransitionEvent::new(&mut subject, &transition);

        event.add_message("card declined");
        event.add_message(String::from("retry later"));
        event.stop_propagation();

        assert!(event.is_propagation_stopped());
        assert_eq!(event.messages(), ["card declined", "retry later"]);
    }

    #[test]
    fn subject_is_mutable_through_the_event() {
        let mut subject = 1u32;
        let transition = Transition::new("new", "paid");
        {
            let mut event = TransitionEvent::new(&mut subject, &transition);
            *event.subject_mut() += 1;
            assert_eq!(*event.subject(), 2);
        }
        assert_eq!(subject, 2);
    }

    #[test]
    fn hook_point_names_are_stable() {
        assert_eq!(HookPoint::OnGuard.to_string(), "statemachine.on_guard");
        assert_eq!(
            HookPoint::PreTransition.as_str(),
            "statemachine.pre_transition"
        );
        assert_eq!(
            HookPoint::PostTransition.as_str(),
            "statemachine.post_transition"
        );
    }
}
