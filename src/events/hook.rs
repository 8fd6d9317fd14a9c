//! Callbacks attached to hook points.

use super::event::TransitionEvent;

/// A callback invoked with the [`TransitionEvent`] of a transition.
///
/// Guards, pre-transition and post-transition hooks all share this shape:
/// they inspect the event, may mutate the subject, append messages or stop
/// propagation.
///
/// # Example
///
/// ```rust
/// use waypoint::core::Transition;
/// use waypoint::events::{Hook, TransitionEvent};
///
/// let deny_payment = Hook::new(|event: &mut TransitionEvent<'_, u32>| {
///     if event.is_transition("new_paid") && *event.subject() == 0 {
///         event.add_message("nothing to pay");
///         event.stop_propagation();
///     }
/// });
///
/// let mut amount = 0u32;
/// let transition = Transition::new("new", "paid");
/// let mut event = TransitionEvent::new(&mut amount, &transition);
/// deny_payment.invoke(&mut event);
///
/// assert!(event.is_propagation_stopped());
/// ```
pub struct Hook<T> {
    callback: Box<dyn Fn(&mut TransitionEvent<'_, T>) + Send + Sync>,
}

impl<T> Hook<T> {
    /// Wrap a callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&mut TransitionEvent<'_, T>) + Send + Sync + 'static,
    {
        Hook {
            callback: Box::new(callback),
        }
    }

    pub fn invoke(&self, event: &mut TransitionEvent<'_, T>) {
        (self.callback)(event)
    }
}

impl<T> std::fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Hook")
    }
}
