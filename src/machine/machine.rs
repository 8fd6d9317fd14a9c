//! State machine driving one subject through guarded transitions.

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::registry::Registry;
use crate::core::{
    transition_name, State, StateType, Transition, TransitionHistory, TransitionRecord,
};
use crate::events::{EventDispatcher, Hook, HookPoint, TransitionEvent};
use crate::machine::builder::MachineBuilder;
use crate::machine::config::MachineConfig;
use crate::machine::error::{GraphError, MachineError, Result};
use crate::subject::{MachineId, StateAccessor, Stateful};
use tracing::{debug, info, warn};

/// Result of a [`StateMachine::transition_to`] call that raised no error.
///
/// `transitioned` is `false` when a guard or pre-transition hook stopped
/// propagation; the machine state is then unchanged. `messages` holds what
/// the hooks appended, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub transitioned: bool,
    pub messages: Vec<String>,
}

impl TransitionOutcome {
    fn committed(messages: Vec<String>) -> Self {
        Self {
            transitioned: true,
            messages,
        }
    }

    fn vetoed(messages: Vec<String>) -> Self {
        Self {
            transitioned: false,
            messages,
        }
    }

    pub fn is_transitioned(&self) -> bool {
        self.transitioned
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Finite state machine bound to a single subject.
///
/// The machine is built in two phases. While unbooted, states,
/// transitions and hooks are added. [`StateMachine::boot`] then validates
/// the subject, assigns the initial state if needed and binds every state
/// to its outgoing transitions. From then on the graph is frozen and
/// [`StateMachine::transition_to`] drives the subject.
///
/// Each transition runs the pipeline guard → pre → commit → post. Guards
/// and pre-transition hooks can veto by stopping propagation; post hooks
/// run after the new state is committed and cannot undo it.
///
/// # Example
///
/// ```rust
/// use waypoint::core::StateType;
/// use waypoint::machine::StateMachine;
/// use waypoint::subject::{MachineId, Stateful};
///
/// #[derive(Default)]
/// struct Order {
///     state: Option<String>,
/// }
///
/// impl Stateful for Order {
///     fn state(&self) -> Option<&str> {
///         self.state.as_deref()
///     }
///
///     fn set_state(&mut self, state: &str) {
///         self.state = Some(state.to_string());
///     }
///
///     fn attach(&mut self, _machine: MachineId) {}
/// }
///
/// # fn main() -> waypoint::Result<()> {
/// let mut machine = StateMachine::new(Order::default());
/// machine
///     .add_state("new", StateType::Initial)?
///     .add_state("paid", StateType::Normal)?
///     .add_state("shipped", StateType::Final)?
///     .add_transition("new", "paid")?
///     .add_transition("paid", "shipped")?;
/// machine.boot()?;
///
/// assert!(machine.transition_to("paid")?.is_transitioned());
/// assert_eq!(machine.subject().unwrap().state(), Some("paid"));
/// # Ok(())
/// # }
/// ```
pub struct StateMachine<T: Stateful + 'static> {
    id: MachineId,
    subject_type: String,
    subject: Option<T>,
    dispatcher: Box<dyn EventDispatcher<T> + Send + Sync>,
    accessor: Box<dyn StateAccessor<T> + Send + Sync>,
    states: Registry<State>,
    transitions: Registry<Transition>,
    booted: bool,
    // set exactly when booted
    current: Option<String>,
    messages: Vec<String>,
    history: TransitionHistory,
    config: MachineConfig,
}

impl<T: Stateful + 'static> StateMachine<T> {
    /// Create a machine driving `subject` with the default collaborators.
    pub fn new(subject: T) -> Self {
        MachineBuilder::new().subject(subject).build()
    }

    /// Create a machine expecting subjects tagged `subject_type`, with no
    /// subject bound yet.
    pub fn for_type(subject_type: impl Into<String>) -> Self {
        MachineBuilder::new().subject_type(subject_type).build()
    }

    pub fn builder() -> MachineBuilder<T> {
        MachineBuilder::new()
    }

    pub(crate) fn from_parts(
        subject_type: String,
        subject: Option<T>,
        dispatcher: Box<dyn EventDispatcher<T> + Send + Sync>,
        accessor: Box<dyn StateAccessor<T> + Send + Sync>,
        config: MachineConfig,
    ) -> Self {
        let mut machine = Self {
            id: MachineId::new(),
            subject_type,
            subject: None,
            dispatcher,
            accessor,
            states: Registry::new(),
            transitions: Registry::new(),
            booted: false,
            current: None,
            messages: Vec::new(),
            history: TransitionHistory::new(),
            config,
        };
        if let Some(subject) = subject {
            machine.attach(subject);
        }
        machine
    }

    /// Replace the runtime options before boot.
    pub fn set_config(&mut self, config: MachineConfig) -> Result<&mut Self> {
        self.ensure_unbooted("set config")?;
        self.config = config;
        Ok(self)
    }

    /// Bind the subject to drive, replacing any previous one.
    pub fn bind(&mut self, subject: T) -> Result<&mut Self> {
        self.ensure_unbooted("bind a subject")?;
        self.attach(subject);
        Ok(self)
    }

    fn attach(&mut self, mut subject: T) {
        subject.attach(self.id);
        self.subject = Some(subject);
    }

    fn ensure_unbooted(&self, operation: &'static str) -> Result<(), GraphError> {
        if self.booted {
            return Err(GraphError::MachineBooted { operation });
        }
        Ok(())
    }

    /// Add a state.
    ///
    /// Reusing a name replaces the earlier state, keeping its position in
    /// the scan order. Only the one-initial-state rule is enforced.
    pub fn add_state(&mut self, name: impl Into<String>, kind: StateType) -> Result<&mut Self> {
        self.ensure_unbooted("add state")?;
        let name = name.into();
        if kind == StateType::Initial {
            if let Some(initial) = self.initial_state() {
                return Err(GraphError::DuplicateInitialState {
                    current: initial.name().to_string(),
                }
                .into());
            }
        }

        let replaced = self
            .states
            .insert(name.as_str(), State::new(name.as_str(), kind))
            .is_some();
        debug!(machine = %self.id, state = %name, kind = ?kind, replaced, "Added state");
        Ok(self)
    }

    /// Add a transition between two existing states.
    ///
    /// Adding the same pair again replaces the earlier transition.
    pub fn add_transition(&mut self, from: &str, to: &str) -> Result<&mut Self> {
        self.ensure_unbooted("add transition")?;
        for name in [from, to] {
            if !self.states.contains(name) {
                return Err(GraphError::UnknownState {
                    name: name.to_string(),
                    available: self.states.key_list(),
                }
                .into());
            }
        }

        let transition = Transition::new(from, to);
        if let Some(existing) = self.transitions.get(transition.name()) {
            if existing.from() != from || existing.to() != to {
                return Err(GraphError::TransitionNameCollision {
                    name: transition.name().to_string(),
                    from: from.to_string(),
                    to: to.to_string(),
                    existing_from: existing.from().to_string(),
                    existing_to: existing.to().to_string(),
                }
                .into());
            }
        }

        debug!(machine = %self.id, transition = %transition.name(), "Added transition");
        self.transitions.insert(transition.name().to_string(), transition);
        Ok(self)
    }

    /// Attach a guard to the named transition.
    ///
    /// Guards run in registration order and receive every transition's
    /// event; see [`TransitionEvent::is_transition`].
    pub fn add_guard<F>(&mut self, transition: &str, guard: F) -> Result<&mut Self>
    where
        F: Fn(&mut TransitionEvent<'_, T>) + Send + Sync + 'static,
    {
        self.register(HookPoint::OnGuard, transition, Hook::new(guard), 0)
    }

    /// Attach a pre-transition hook to the named transition.
    pub fn add_pre_transition<F>(&mut self, transition: &str, hook: F) -> Result<&mut Self>
    where
        F: Fn(&mut TransitionEvent<'_, T>) + Send + Sync + 'static,
    {
        self.register(HookPoint::PreTransition, transition, Hook::new(hook), 0)
    }

    /// Attach a post-transition hook to the named transition.
    ///
    /// Higher priorities run first; equal priorities run in registration
    /// order. The conventional default priority is 0.
    pub fn add_post_transition<F>(
        &mut self,
        transition: &str,
        hook: F,
        priority: i32,
    ) -> Result<&mut Self>
    where
        F: Fn(&mut TransitionEvent<'_, T>) + Send + Sync + 'static,
    {
        self.register(HookPoint::PostTransition, transition, Hook::new(hook), priority)
    }

    fn register(
        &mut self,
        point: HookPoint,
        transition: &str,
        hook: Hook<T>,
        priority: i32,
    ) -> Result<&mut Self> {
        let operation = match point {
            HookPoint::OnGuard => "add guard",
            HookPoint::PreTransition => "add pre-transition",
            HookPoint::PostTransition => "add post-transition",
        };
        self.ensure_unbooted(operation)?;
        if !self.transitions.contains(transition) {
            return Err(MachineError::UnknownTransition {
                name: transition.to_string(),
                available: self.transitions.key_list(),
            });
        }

        self.dispatcher.add_listener(point, hook, priority);
        debug!(machine = %self.id, %transition, hook_point = %point, priority, "Registered hook");
        Ok(self)
    }

    /// Validate the subject, settle its starting state and freeze the graph.
    ///
    /// A subject without a persisted state is moved to the initial state.
    pub fn boot(&mut self) -> Result<()> {
        if self.booted {
            return Err(MachineError::AlreadyBooted);
        }
        let subject = self.subject.as_mut().ok_or(MachineError::MissingSubject)?;
        let found = subject.type_tag();
        if found != self.subject_type {
            return Err(MachineError::TypeMismatch {
                expected: self.subject_type.clone(),
                found: found.to_string(),
            });
        }

        let persisted = self
            .accessor
            .get_state(subject)
            .filter(|name| !name.is_empty());
        let assigned = persisted.is_none();
        let current = match persisted {
            Some(name) => name,
            None => find_initial(&self.states)
                .map(|state| state.name().to_string())
                .ok_or(MachineError::NoInitialState)?,
        };
        if !self.states.contains(&current) {
            return Err(MachineError::UnknownCurrentState { name: current });
        }

        if assigned {
            self.accessor.set_state(subject, &current);
        }
        self.bind_transitions();
        info!(
            machine = %self.id,
            subject_type = %self.subject_type,
            state = %current,
            assigned_initial = assigned,
            states = self.states.len(),
            transitions = self.transitions.len(),
            "Booted state machine"
        );
        self.current = Some(current);
        self.booted = true;
        Ok(())
    }

    /// Bind every state to its outgoing transitions, in transition order.
    fn bind_transitions(&mut self) {
        let transitions = &self.transitions;
        for state in self.states.values_mut() {
            let (destinations, names): (Vec<String>, Vec<String>) = transitions
                .values()
                .filter(|transition| transition.from() == state.name())
                .map(|transition| (transition.to().to_string(), transition.name().to_string()))
                .unzip();
            state.bind(destinations, names);
        }
    }

    /// Move the subject to `state`.
    ///
    /// Returns an error when the machine is not booted or `state` is not
    /// reachable from the current state; no hook runs in that case. A veto
    /// by a guard or pre-transition hook is reported as an outcome with
    /// `transitioned == false`.
    pub fn transition_to(&mut self, state: &str) -> Result<TransitionOutcome> {
        let from = self.current_state().ok_or(MachineError::NotBooted)?;
        if !from.leads_to(state) {
            return Err(MachineError::IllegalTransition {
                from: from.name().to_string(),
                to: state.to_string(),
                allowed: from.transitions().to_vec(),
            });
        }
        let name = transition_name(from.name(), state);

        let Self {
            id,
            subject,
            dispatcher,
            accessor,
            transitions,
            current,
            messages,
            history,
            config,
            ..
        } = self;
        let transition = transitions
            .get(&name)
            .ok_or_else(|| MachineError::UnknownTransition {
                name: name.clone(),
                available: transitions.key_list(),
            })?;
        let subject = subject.as_mut().ok_or(MachineError::MissingSubject)?;
        let mut event = TransitionEvent::new(subject, transition);

        for point in [HookPoint::OnGuard, HookPoint::PreTransition] {
            dispatcher.dispatch(point, &mut event);
            *messages = event.messages().to_vec();
            if event.is_propagation_stopped() {
                debug!(machine = %id, transition = %name, hook_point = %point, ?messages, "Transition vetoed");
                return Ok(TransitionOutcome::vetoed(messages.clone()));
            }
        }

        *current = Some(state.to_string());
        accessor.set_state(event.subject_mut(), state);
        if config.record_history {
            history.record_bounded(TransitionRecord::now(transition), config.history_limit);
        }
        debug!(machine = %id, transition = %name, "Transition committed");

        dispatcher.dispatch(HookPoint::PostTransition, &mut event);
        *messages = event.messages().to_vec();
        if event.is_propagation_stopped() {
            warn!(machine = %id, transition = %name, "Post-transition hook stopped propagation after commit");
        }
        Ok(TransitionOutcome::committed(messages.clone()))
    }

    /// Destination names reachable from the current state, in binding order.
    pub fn allowed_transitions(&self) -> Result<&[String]> {
        self.current_state()
            .map(State::transitions)
            .ok_or(MachineError::NotBooted)
    }

    pub fn can_transition_to(&self, state: &str) -> Result<bool> {
        self.current_state()
            .map(|current| current.leads_to(state))
            .ok_or(MachineError::NotBooted)
    }

    /// Messages of the last `transition_to` call, including vetoed ones.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Current state, `None` before boot.
    pub fn current_state(&self) -> Option<&State> {
        self.current
            .as_deref()
            .and_then(|name| self.states.get(name))
    }

    pub fn initial_state(&self) -> Option<&State> {
        find_initial(&self.states)
    }

    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.get(name)
    }

    /// States in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    pub fn transition(&self, name: &str) -> Option<&Transition> {
        self.transitions.get(name)
    }

    /// Transitions in declaration order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.values()
    }

    pub fn is_booted(&self) -> bool {
        self.booted
    }

    pub fn id(&self) -> MachineId {
        self.id
    }

    /// Type tag subjects must report at boot.
    pub fn subject_type(&self) -> &str {
        &self.subject_type
    }

    pub fn subject(&self) -> Option<&T> {
        self.subject.as_ref()
    }

    /// Mutable access to the subject.
    ///
    /// Changing the persisted state name through this handle bypasses the
    /// machine; the cached current state is not updated.
    pub fn subject_mut(&mut self) -> Option<&mut T> {
        self.subject.as_mut()
    }

    pub fn into_subject(self) -> Option<T> {
        self.subject
    }

    pub fn history(&self) -> &TransitionHistory {
        &self.history
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Capture the machine's runtime position.
    pub fn checkpoint(&self) -> Result<Checkpoint> {
        let current = self.current_state().ok_or(MachineError::NotBooted)?;
        Ok(Checkpoint::capture(
            self.id,
            &self.subject_type,
            current.name(),
            self.history.clone(),
        ))
    }

    /// Resume from a checkpoint before booting.
    ///
    /// Replaces the history and, if the subject has no persisted state,
    /// persists the checkpoint's state so the next boot resumes there. A
    /// subject already persisted in another state is refused.
    pub fn restore(&mut self, checkpoint: &Checkpoint) -> Result<&mut Self> {
        self.ensure_unbooted("restore a checkpoint")?;
        checkpoint.verify_version()?;
        if checkpoint.subject_type != self.subject_type {
            return Err(CheckpointError::SubjectMismatch {
                expected: self.subject_type.clone(),
                found: checkpoint.subject_type.clone(),
            }
            .into());
        }
        if !self.states.contains(&checkpoint.current_state) {
            return Err(CheckpointError::UnknownState(checkpoint.current_state.clone()).into());
        }
        let subject = self.subject.as_mut().ok_or(MachineError::MissingSubject)?;

        let persisted = self
            .accessor
            .get_state(subject)
            .filter(|name| !name.is_empty());
        match persisted {
            Some(state) if state != checkpoint.current_state => {
                return Err(CheckpointError::StateMismatch {
                    persisted: state,
                    checkpoint: checkpoint.current_state.clone(),
                }
                .into());
            }
            Some(_) => {}
            None => self.accessor.set_state(subject, &checkpoint.current_state),
        }
        self.history = checkpoint.history.clone();
        info!(
            machine = %self.id,
            checkpoint = %checkpoint.id,
            state = %checkpoint.current_state,
            records = self.history.len(),
            "Restored checkpoint"
        );
        Ok(self)
    }
}

fn find_initial(states: &Registry<State>) -> Option<&State> {
    states.values().find(|state| state.is_initial())
}

impl<T: Stateful + 'static> std::fmt::Debug for StateMachine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("subject_type", &self.subject_type)
            .field("booted", &self.booted)
            .field("current", &self.current)
            .field("states", &self.states.key_list())
            .field("transitions", &self.transitions.key_list())
            .finish()
    }
}
