//! Reading and writing a subject's current-state name.

use super::Stateful;

/// Pluggable access to the state name persisted on a subject.
///
/// The machine reads it once at boot and writes it at boot (initial state
/// only) and at the commit step of every transition.
pub trait StateAccessor<T> {
    /// Current state name; `None` or an empty string means unset.
    fn get_state(&self, subject: &T) -> Option<String>;

    fn set_state(&self, subject: &mut T, state: &str);
}

/// Default accessor, delegating to [`Stateful::state`] and
/// [`Stateful::set_state`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SubjectAccessor;

impl<T: Stateful> StateAccessor<T> for SubjectAccessor {
    fn get_state(&self, subject: &T) -> Option<String> {
        subject.state().map(str::to_string)
    }

    fn set_state(&self, subject: &mut T, state: &str) {
        subject.set_state(state);
    }
}

type Getter<T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync>;
type Setter<T> = Box<dyn Fn(&mut T, &str) + Send + Sync>;

/// Accessor built from a getter and a setter closure.
///
/// Useful when the state name lives somewhere other than the subject's
/// [`Stateful`] implementation, e.g. a status column of a row.
///
/// ```rust
/// use waypoint::subject::{FnAccessor, StateAccessor};
///
/// struct Row {
///     status: String,
/// }
///
/// let accessor = FnAccessor::new(
///     |row: &Row| Some(row.status.clone()),
///     |row: &mut Row, state: &str| row.status = state.to_string(),
/// );
///
/// let mut row = Row { status: String::new() };
/// accessor.set_state(&mut row, "paid");
/// assert_eq!(accessor.get_state(&row).as_deref(), Some("paid"));
/// ```
pub struct FnAccessor<T> {
    getter: Getter<T>,
    setter: Setter<T>,
}

impl<T> FnAccessor<T> {
    pub fn new<G, S>(getter: G, setter: S) -> Self
    where
        G: Fn(&T) -> Option<String> + Send + Sync + 'static,
        S: Fn(&mut T, &str) + Send + Sync + 'static,
    {
        Self {
            getter: Box::new(getter),
            setter: Box::new(setter),
        }
    }
}

impl<T> StateAccessor<T> for FnAccessor<T> {
    fn get_state(&self, subject: &T) -> Option<String> {
        (self.getter)(subject)
    }

    fn set_state(&self, subject: &mut T, state: &str) {
        (self.setter)(subject, state)
    }
}

impl<T> std::fmt::Debug for FnAccessor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnAccessor")
    }
}
