//! Publish/subscribe substrate for the transition pipeline.

use super::event::{HookPoint, TransitionEvent};
use super::hook::Hook;
use std::collections::HashMap;

/// Registers hooks against hook points and invokes them in order.
///
/// Dispatch is keyed by hook point only. Every hook registered at a point
/// receives every event dispatched there.
pub trait EventDispatcher<T> {
    /// Register `hook` at `point`. Higher priorities run first.
    fn add_listener(&mut self, point: HookPoint, hook: Hook<T>, priority: i32);

    /// Pass `event` through the hooks registered at `point`, in place.
    fn dispatch(&self, point: HookPoint, event: &mut TransitionEvent<'_, T>);

    /// Number of hooks registered at `point`.
    fn listener_count(&self, point: HookPoint) -> usize;
}

struct Listener<T> {
    priority: i32,
    hook: Hook<T>,
}

/// Default dispatcher.
///
/// Hooks run in descending priority, and in registration order among equal
/// priorities. Once a hook stops propagation, the remaining hooks at that
/// point are skipped.
pub struct PriorityDispatcher<T> {
    listeners: HashMap<HookPoint, Vec<Listener<T>>>,
}

impl<T> PriorityDispatcher<T> {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }
}

impl<T> Default for PriorityDispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventDispatcher<T> for PriorityDispatcher<T> {
    fn add_listener(&mut self, point: HookPoint, hook: Hook<T>, priority: i32) {
        let listeners = self.listeners.entry(point).or_default();
        // after every listener of equal or higher priority
        let slot = listeners.partition_point(|listener| listener.priority >= priority);
        listeners.insert(slot, Listener { priority, hook });
    }

    fn dispatch(&self, point: HookPoint, event: &mut TransitionEvent<'_, T>) {
        let Some(listeners) = self.listeners.get(&point) else {
            return;
        };
        for listener in listeners {
            if event.is_propagation_stopped() {
                break;
            }
            listener.hook.invoke(event);
        }
    }

    fn listener_count(&self, point: HookPoint) -> usize {
        self.listeners.get(&point).map_or(0, Vec::len)
    }
}

impl<T> std::fmt::Debug for PriorityDispatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<_> = self
            .listeners
            .iter()
            .map(|(point, listeners)| (point.as_str(), listeners.len()))
            .collect();
        counts.sort();
        f.debug_struct("PriorityDispatcher")
            .field("listeners", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transition;

    type Log = Vec<String>;

    fn push(label: &'static str) -> Hook<Log> {
        Hook::new(move |event: &mut TransitionEvent<'_, Log>| {
            event.subject_mut().push(label.to_string());
        })
    }

    fn run(dispatcher: &PriorityDispatcher<Log>, point: HookPoint) -> Log {
        let mut log = Log::new();
        let transition = Transition::new("new", "paid");
        let mut event = TransitionEvent::new(&mut log, &transition);
        dispatcher.dispatch(point, &mut event);
        log
    }

    #[test]
    fn higher_priority_runs_first() {
        let mut dispatcher = PriorityDispatcher::new();
        dispatcher.add_listener(HookPoint::PostTransition, push("five"), 5);
        dispatcher.add_listener(HookPoint::PostTransition, push("one"), 1);
        dispatcher.add_listener(HookPoint::PostTransition, push("ten"), 10);

        assert_eq!(
            run(&dispatcher, HookPoint::PostTransition),
            ["ten", "five", "one"]
        );
    }

    #[test]
    fn equal_priorities_keep_registration_order() {
        let mut dispatcher = PriorityDispatcher::new();
        dispatcher.add_listener(HookPoint::OnGuard, push("a"), 0);
        dispatcher.add_listener(HookPoint::OnGuard, push("b"), 0);
        dispatcher.add_listener(HookPoint::OnGuard, push("c"), 0);

        assert_eq!(run(&dispatcher, HookPoint::OnGuard), ["a", "b", "c"]);
    }

    #[test]
    fn negative_priorities_run_last() {
        let mut dispatcher = PriorityDispatcher::new();
        dispatcher.add_listener(HookPoint::PostTransition, push("late"), -1);
        dispatcher.add_listener(HookPoint::PostTransition, push("default"), 0);

        assert_eq!(
            run(&dispatcher, HookPoint::PostTransition),
            ["default", "late"]
        );
    }

    #[test]
    fn dispatch_only_reaches_its_hook_point() {
        let mut dispatcher = PriorityDispatcher::new();
        dispatcher.add_listener(HookPoint::OnGuard, push("guard"), 0);
        dispatcher.add_listener(HookPoint::PreTransition, push("pre"), 0);

        assert_eq!(run(&dispatcher, HookPoint::PreTransition), ["pre"]);
        assert!(run(&dispatcher, HookPoint::PostTransition).is_empty());
        assert_eq!(dispatcher.listener_count(HookPoint::OnGuard), 1);
        assert_eq!(dispatcher.listener_count(HookPoint::PostTransition), 0);
    }

    #[test]
    fn stopped_event_skips_remaining_listeners() {
        let mut dispatcher = PriorityDispatcher::new();
        dispatcher.add_listener(HookPoint::OnGuard, push("first"), 0);
        dispatcher.add_listener(
            HookPoint::OnGuard,
            Hook::new(|event: &mut TransitionEvent<'_, Log>| {
                event.subject_mut().push("stopper".to_string());
                event.stop_propagation();
            }),
            0,
        );
        dispatcher.add_listener(HookPoint::OnGuard, push("never"), 0);

        assert_eq!(run(&dispatcher, HookPoint::OnGuard), ["first", "stopper"]);
    }
}
