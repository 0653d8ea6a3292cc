//! Builder for assembling a machine's definition table.

use crate::builder::definition::{Definition, Registrations};
use crate::builder::error::ConfigError;
use crate::core::{
    factory, BehaviorFactory, Destination, Predicate, StateBehavior, StateName, TransitionName,
};
use crate::driver::StateMachine;

/// Builder for constructing machine definitions with a fluent API.
///
/// Registration never fails on its own: names may reference states or
/// transitions that are registered later. All cross-references are
/// checked by [`build`](Self::build).
///
/// # Example
///
/// ```rust
/// use ticksm::{MachineBuilder, Passive, Predicate};
///
/// let machine = MachineBuilder::<()>::new()
///     .add_state("idle", |_| Passive, ["go"])
///     .add_state("done", |_| Passive, Vec::<&str>::new())
///     .add_transition("go", Predicate::always(), "done")
///     .set_start("idle")
///     .set_end(["done"])
///     .start(())
///     .unwrap();
///
/// assert_eq!(machine.current_state_name(), "IDLE");
/// ```
pub struct MachineBuilder<E> {
    states: Vec<(StateName, BehaviorFactory<E>, Vec<TransitionName>)>,
    transitions: Vec<(TransitionName, Predicate, Destination)>,
    start: Option<StateName>,
    ends: Vec<StateName>,
    label: Option<String>,
}

impl<E: 'static> MachineBuilder<E> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            transitions: Vec::new(),
            start: None,
            ends: Vec::new(),
            label: None,
        }
    }

    /// Register or overwrite a state.
    ///
    /// `construct` is called with the machine's entity every time the
    /// state is entered. Exit transitions are tested in the order given.
    pub fn add_state<B, F, I>(self, name: impl AsRef<str>, construct: F, exits: I) -> Self
    where
        B: StateBehavior + 'static,
        F: Fn(E) -> B + Send + Sync + 'static,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.add_state_factory(name, factory(construct), exits)
    }

    /// Register or overwrite a state using a pre-built factory.
    pub fn add_state_factory<I>(
        mut self,
        name: impl AsRef<str>,
        factory: BehaviorFactory<E>,
        exits: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let name = StateName::new(name);
        let exits = exits.into_iter().map(TransitionName::new).collect();
        match self.states.iter_mut().find(|(existing, _, _)| *existing == name) {
            Some(slot) => *slot = (name, factory, exits),
            None => self.states.push((name, factory, exits)),
        }
        self
    }

    /// Register or overwrite a transition.
    ///
    /// `destination` is a state name, or `"return"` (any case) to go back
    /// to the previously active state.
    pub fn add_transition(
        mut self,
        name: impl AsRef<str>,
        predicate: impl Into<Predicate>,
        destination: impl AsRef<str>,
    ) -> Self {
        let name = TransitionName::new(name);
        let entry = (name, predicate.into(), Destination::parse(destination));
        match self
            .transitions
            .iter_mut()
            .find(|(existing, _, _)| *existing == entry.0)
        {
            Some(slot) => *slot = entry,
            None => self.transitions.push(entry),
        }
        self
    }

    /// Set the start state (required).
    pub fn set_start(mut self, name: impl AsRef<str>) -> Self {
        self.start = Some(StateName::new(name));
        self
    }

    /// Add terminal states. Repeated calls accumulate.
    pub fn set_end<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            let name = StateName::new(name);
            if !self.ends.contains(&name) {
                self.ends.push(name);
            }
        }
        self
    }

    /// Name machines built from this definition in log output.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Validate and freeze the definition table.
    pub fn build(self) -> Result<Definition<E>, ConfigError> {
        Definition::resolve(Registrations {
            states: self.states,
            transitions: self.transitions,
            start: self.start,
            ends: self.ends,
            label: self.label,
        })
    }

    /// Build the definition and start a machine driving `entity`.
    pub fn start(self, entity: E) -> Result<StateMachine<E>, ConfigError>
    where
        E: Clone,
    {
        Ok(self.build()?.start(entity))
    }
}

impl<E: 'static> Default for MachineBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Passive;

    fn no_exits() -> Vec<&'static str> {
        Vec::new()
    }

    fn three_state() -> MachineBuilder<()> {
        MachineBuilder::new()
            .add_state("idle", |_| Passive, ["go"])
            .add_state("running", |_| Passive, ["stop"])
            .add_state("done", |_| Passive, no_exits())
            .add_transition("go", Predicate::never(), "running")
            .add_transition("stop", Predicate::never(), "done")
            .set_start("idle")
            .set_end(["done"])
    }

    #[test]
    fn builder_requires_start_state() {
        let result = MachineBuilder::<()>::new()
            .add_state("idle", |_| Passive, no_exits())
            .build();

        assert!(matches!(result, Err(ConfigError::MissingStartState)));
    }

    #[test]
    fn builder_rejects_unregistered_start() {
        let result = MachineBuilder::<()>::new()
            .add_state("idle", |_| Passive, no_exits())
            .set_start("walking")
            .build();

        assert_eq!(
            result.err(),
            Some(ConfigError::UnknownStartState(StateName::new("WALKING")))
        );
    }

    #[test]
    fn transitions_may_be_registered_after_states() {
        let definition = three_state().build().unwrap();

        let transitions: Vec<_> = definition.transition_names().map(|n| n.as_str()).collect();
        assert_eq!(transitions, vec!["GO", "STOP"]);
    }

    #[test]
    fn builder_rejects_unknown_exit_transition() {
        let result = three_state()
            .add_state("running", |_| Passive, ["stop", "crash"])
            .build();

        assert_eq!(
            result.err(),
            Some(ConfigError::UnknownTransition {
                state: StateName::new("running"),
                transition: TransitionName::new("crash"),
            })
        );
    }

    #[test]
    fn builder_rejects_unknown_destination() {
        let result = three_state()
            .add_transition("stop", Predicate::never(), "halted")
            .build();

        assert_eq!(
            result.err(),
            Some(ConfigError::UnknownDestination {
                transition: TransitionName::new("stop"),
                destination: StateName::new("halted"),
            })
        );
    }

    #[test]
    fn builder_reports_every_problem() {
        let result = MachineBuilder::<()>::new()
            .add_state("idle", |_| Passive, ["go"])
            .add_transition("leave", Predicate::always(), "nowhere")
            .set_end(["finish"])
            .build();

        let error = result.err().unwrap();
        let problems = error.problems();
        assert_eq!(problems.len(), 4);
        assert!(problems
            .iter()
            .any(|p| matches!(p, ConfigError::MissingStartState)));
        assert!(problems
            .iter()
            .any(|p| matches!(p, ConfigError::UnknownEndState(_))));
        assert!(problems
            .iter()
            .any(|p| matches!(p, ConfigError::UnknownTransition { .. })));
        assert!(problems
            .iter()
            .any(|p| matches!(p, ConfigError::UnknownDestination { .. })));
    }

    #[test]
    fn global_cannot_be_started_ended_or_targeted() {
        let result = MachineBuilder::<()>::new()
            .add_state("global", |_| Passive, ["jump"])
            .add_state("idle", |_| Passive, no_exits())
            .add_transition("jump", Predicate::always(), "Global")
            .set_start("GLOBAL")
            .set_end(["global"])
            .build();

        let error = result.err().unwrap();
        let usages: Vec<_> = error
            .problems()
            .into_iter()
            .filter_map(|p| match p {
                ConfigError::ReservedName { usage, .. } => Some(*usage),
                _ => None,
            })
            .collect();
        assert_eq!(
            usages,
            vec!["the start state", "an end state", "a transition destination"]
        );
    }

    #[test]
    fn return_is_not_a_state_name() {
        let result = three_state()
            .add_state("Return", |_| Passive, no_exits())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::ReservedName { usage: "a state name", .. })
        ));
    }

    #[test]
    fn names_are_case_insensitive_across_registration() {
        let definition = MachineBuilder::<()>::new()
            .add_state("Idle", |_| Passive, ["Go"])
            .add_state("DONE", |_| Passive, no_exits())
            .add_transition("GO", Predicate::always(), "done")
            .set_start("idle")
            .set_end(["Done"])
            .build()
            .unwrap();

        assert_eq!(definition.start_state(), "IDLE");
        assert!(definition.is_end_state("done"));
        assert!(!definition.is_end_state("idle"));
    }

    #[test]
    fn re_registering_overwrites() {
        let definition = three_state()
            .add_state("IDLE", |_| Passive, ["stop"])
            .add_transition("Go", Predicate::always(), "done")
            .build()
            .unwrap();

        assert_eq!(definition.state_names().count(), 3);
        assert_eq!(definition.transition_names().count(), 2);
    }

    #[test]
    fn set_end_is_additive() {
        let definition = three_state().set_end(["running"]).build().unwrap();

        assert!(definition.is_end_state("running"));
        assert!(definition.is_end_state("done"));
    }

    #[test]
    fn global_state_is_detected() {
        let definition = three_state()
            .add_state("global", |_| Passive, no_exits())
            .build()
            .unwrap();

        assert!(definition.has_global());
        assert!(!three_state().build().unwrap().has_global());
    }

    #[test]
    fn label_is_carried_into_definition() {
        let definition = three_state().label("door").build().unwrap();
        assert_eq!(definition.label(), Some("door"));
    }
}
