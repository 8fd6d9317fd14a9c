//! Builder for constructing state machines.

use crate::events::{EventDispatcher, PriorityDispatcher};
use crate::machine::{MachineConfig, StateMachine};
use crate::subject::{StateAccessor, Stateful, SubjectAccessor};

/// Builder for a [`StateMachine`] with custom collaborators.
///
/// Every part is optional: the subject can be bound later with
/// [`StateMachine::bind`], the dispatcher defaults to
/// [`PriorityDispatcher`] and the accessor to [`SubjectAccessor`].
pub struct MachineBuilder<T: Stateful + 'static> {
    subject: Option<T>,
    subject_type: Option<String>,
    dispatcher: Option<Box<dyn EventDispatcher<T> + Send + Sync>>,
    accessor: Option<Box<dyn StateAccessor<T> + Send + Sync>>,
    config: MachineConfig,
}

impl<T: Stateful + 'static> MachineBuilder<T> {
    pub fn new() -> Self {
        Self {
            subject: None,
            subject_type: None,
            dispatcher: None,
            accessor: None,
            config: MachineConfig::default(),
        }
    }

    /// Subject the machine drives.
    pub fn subject(mut self, subject: T) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Type tag the subject must report at boot.
    ///
    /// Defaults to `std::any::type_name::<T>()`.
    pub fn subject_type(mut self, subject_type: impl Into<String>) -> Self {
        self.subject_type = Some(subject_type.into());
        self
    }

    pub fn dispatcher<D>(mut self, dispatcher: D) -> Self
    where
        D: EventDispatcher<T> + Send + Sync + 'static,
    {
        self.dispatcher = Some(Box::new(dispatcher));
        self
    }

    pub fn accessor<A>(mut self, accessor: A) -> Self
    where
        A: StateAccessor<T> + Send + Sync + 'static,
    {
        self.accessor = Some(Box::new(accessor));
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> StateMachine<T> {
        let subject_type = self
            .subject_type
            .unwrap_or_else(|| std::any::type_name::<T>().to_string());
        let dispatcher = self
            .dispatcher
            .unwrap_or_else(|| Box::new(PriorityDispatcher::new()));
        let accessor = self.accessor.unwrap_or_else(|| Box::new(SubjectAccessor));

        StateMachine::from_parts(subject_type, self.subject, dispatcher, accessor, self.config)
    }
}

impl<T: Stateful + 'static> Default for MachineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
