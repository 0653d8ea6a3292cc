//! Validated, immutable definition table.
//!
//! Building resolves every state and transition name to a dense index
//! once, so a running machine never looks names up again.

use crate::builder::error::ConfigError;
use crate::core::{BehaviorFactory, Destination, Predicate, StateBehavior, StateName, TransitionName};
use crate::driver::StateMachine;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Index of a state in a resolved table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct StateId(usize);

/// Index of a transition in a resolved table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TransitionId(usize);

/// Resolved destination of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Target {
    State(StateId),
    Return,
}

pub(crate) struct StateEntry<E> {
    pub(crate) name: StateName,
    factory: BehaviorFactory<E>,
    pub(crate) exits: Vec<TransitionId>,
}

impl<E> StateEntry<E> {
    pub(crate) fn instantiate(&self, entity: E) -> Box<dyn StateBehavior> {
        (self.factory)(entity)
    }
}

pub(crate) struct TransitionEntry {
    pub(crate) name: TransitionName,
    pub(crate) predicate: Predicate,
    pub(crate) target: Target,
}

pub(crate) struct Tables<E> {
    pub(crate) states: Vec<StateEntry<E>>,
    pub(crate) transitions: Vec<TransitionEntry>,
    pub(crate) start: StateId,
    pub(crate) ends: HashSet<StateId>,
    pub(crate) global: Option<StateId>,
    pub(crate) label: Option<String>,
}

impl<E> Tables<E> {
    pub(crate) fn state(&self, id: StateId) -> &StateEntry<E> {
        &self.states[id.0]
    }

    pub(crate) fn transition(&self, id: TransitionId) -> &TransitionEntry {
        &self.transitions[id.0]
    }

    pub(crate) fn is_end(&self, id: StateId) -> bool {
        self.ends.contains(&id)
    }
}

/// Raw registrations handed over by the builder.
pub(crate) struct Registrations<E> {
    pub(crate) states: Vec<(StateName, BehaviorFactory<E>, Vec<TransitionName>)>,
    pub(crate) transitions: Vec<(TransitionName, Predicate, Destination)>,
    pub(crate) start: Option<StateName>,
    pub(crate) ends: Vec<StateName>,
    pub(crate) label: Option<String>,
}

/// An immutable, validated machine definition.
///
/// Cloning is cheap; every clone shares the same tables, so one definition
/// can start any number of independent machines.
pub struct Definition<E> {
    pub(crate) tables: Arc<Tables<E>>,
}

impl<E> Clone for Definition<E> {
    fn clone(&self) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
        }
    }
}

impl<E> Definition<E> {
    /// Validate registrations and intern all names.
    ///
    /// Every problem found is reported, not just the first.
    pub(crate) fn resolve(registrations: Registrations<E>) -> Result<Self, ConfigError> {
        let Registrations {
            states,
            transitions,
            start,
            ends,
            label,
        } = registrations;

        let mut problems = Vec::new();

        let state_ids: HashMap<StateName, StateId> = states
            .iter()
            .enumerate()
            .map(|(index, (name, _, _))| (name.clone(), StateId(index)))
            .collect();
        let transition_ids: HashMap<TransitionName, TransitionId> = transitions
            .iter()
            .enumerate()
            .map(|(index, (name, _, _))| (name.clone(), TransitionId(index)))
            .collect();

        for (name, _, _) in &states {
            if name.is_return() {
                problems.push(ConfigError::ReservedName {
                    name: name.clone(),
                    usage: "a state name",
                });
            }
        }

        let start = match start {
            None => {
                problems.push(ConfigError::MissingStartState);
                None
            }
            Some(name) if name.is_global() => {
                problems.push(ConfigError::ReservedName {
                    name,
                    usage: "the start state",
                });
                None
            }
            Some(name) => match state_ids.get(&name) {
                Some(&id) => Some(id),
                None => {
                    problems.push(ConfigError::UnknownStartState(name));
                    None
                }
            },
        };

        let mut end_ids = HashSet::new();
        for name in ends {
            if name.is_global() {
                problems.push(ConfigError::ReservedName {
                    name,
                    usage: "an end state",
                });
                continue;
            }
            match state_ids.get(&name) {
                Some(&id) => {
                    end_ids.insert(id);
                }
                None => problems.push(ConfigError::UnknownEndState(name)),
            }
        }

        let mut state_entries = Vec::with_capacity(states.len());
        for (name, factory, exit_names) in states {
            let mut exits = Vec::with_capacity(exit_names.len());
            for transition in exit_names {
                match transition_ids.get(&transition) {
                    Some(&id) => exits.push(id),
                    None => problems.push(ConfigError::UnknownTransition {
                        state: name.clone(),
                        transition,
                    }),
                }
            }
            state_entries.push(StateEntry {
                name,
                factory,
                exits,
            });
        }

        let mut transition_entries = Vec::with_capacity(transitions.len());
        for (name, predicate, destination) in transitions {
            let target = match destination {
                Destination::Return => Some(Target::Return),
                Destination::State(state) if state.is_global() => {
                    problems.push(ConfigError::ReservedName {
                        name: state,
                        usage: "a transition destination",
                    });
                    None
                }
                Destination::State(state) => match state_ids.get(&state) {
                    Some(&id) => Some(Target::State(id)),
                    None => {
                        problems.push(ConfigError::UnknownDestination {
                            transition: name.clone(),
                            destination: state,
                        });
                        None
                    }
                },
            };
            if let Some(target) = target {
                transition_entries.push(TransitionEntry {
                    name,
                    predicate,
                    target,
                });
            }
        }

        if let Some(error) = ConfigError::from_problems(problems) {
            return Err(error);
        }
        let Some(start) = start else {
            return Err(ConfigError::MissingStartState);
        };

        let global = state_entries
            .iter()
            .position(|entry| entry.name.is_global())
            .map(StateId);

        Ok(Definition {
            tables: Arc::new(Tables {
                states: state_entries,
                transitions: transition_entries,
                start,
                ends: end_ids,
                global,
                label,
            }),
        })
    }

    /// Start a new machine driving `entity`.
    ///
    /// The start state's behavior is constructed and entered; the overlay,
    /// if any, is constructed but not entered.
    pub fn start(&self, entity: E) -> StateMachine<E>
    where
        E: Clone,
    {
        StateMachine::start(self.clone(), entity)
    }

    /// Registered state names, in registration order (including `GLOBAL`).
    pub fn state_names(&self) -> impl Iterator<Item = &StateName> {
        self.tables.states.iter().map(|entry| &entry.name)
    }

    /// Registered transition names, in registration order.
    pub fn transition_names(&self) -> impl Iterator<Item = &TransitionName> {
        self.tables.transitions.iter().map(|entry| &entry.name)
    }

    /// The configured start state.
    pub fn start_state(&self) -> &StateName {
        &self.tables.state(self.tables.start).name
    }

    /// Whether `name` is one of the configured end states.
    pub fn is_end_state(&self, name: impl AsRef<str>) -> bool {
        let name = StateName::new(name);
        self.tables
            .ends
            .iter()
            .any(|&id| self.tables.state(id).name == name)
    }

    /// Whether a `GLOBAL` overlay state is registered.
    pub fn has_global(&self) -> bool {
        self.tables.global.is_some()
    }

    /// The label used to identify machines started from this definition.
    pub fn label(&self) -> Option<&str> {
        self.tables.label.as_deref()
    }
}
