//! Running state machine: lifecycle protocol and tick evaluation.

use crate::builder::definition::{Definition, StateId, Tables, Target, TransitionId};
use crate::builder::error::ConfigError;
use crate::core::{ChangeSource, StateBehavior, StateChange, StateName};
use crate::driver::evaluate::first_firing;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Bookkeeping state of the driver itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverStatus {
    /// Started and not yet in an end state
    Running,
    /// An end state has been reached; stays set for good
    Finished,
}

/// What happened during one `tick()`.
#[derive(Clone, Debug)]
pub struct TickOutcome {
    /// State changes in the order they happened (overlay first)
    pub changes: Vec<StateChange>,
    /// Whether the machine is finished after this tick
    pub finished: bool,
}

impl TickOutcome {
    /// Whether any transition fired.
    pub fn changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

type Observer = Box<dyn FnMut(&StateChange) + Send>;

/// A started machine driving one entity.
///
/// Created by [`Definition::start`] or [`MachineBuilder::start`](crate::MachineBuilder::start).
/// The host calls [`tick`](Self::tick) from its own loop, typically once per
/// frame.
pub struct StateMachine<E> {
    id: Uuid,
    definition: Definition<E>,
    entity: E,
    current: StateId,
    previous: Option<StateId>,
    active: Box<dyn StateBehavior>,
    global: Option<Box<dyn StateBehavior>>,
    finished: bool,
    ticks: u64,
    observers: Vec<Observer>,
}

impl<E: Clone> StateMachine<E> {
    pub(crate) fn start(definition: Definition<E>, entity: E) -> Self {
        let id = Uuid::new_v4();
        let tables = &definition.tables;
        let start = tables.start;
        let entry = tables.state(start);

        debug!(
            machine = %id,
            label = tables.label.as_deref().unwrap_or("-"),
            state = %entry.name,
            "Starting state machine"
        );

        let mut active = entry.instantiate(entity.clone());
        active.enter();

        let global = tables.global.map(|global| {
            debug!(machine = %id, "Global overlay activated");
            tables.state(global).instantiate(entity.clone())
        });

        Self {
            id,
            definition,
            entity,
            current: start,
            previous: None,
            active,
            global,
            finished: false,
            ticks: 0,
            observers: Vec::new(),
        }
    }

    /// Advance the machine by one step.
    ///
    /// Order within a tick:
    /// 1. overlay `execute`, then overlay transitions (a change here is
    ///    fully applied, including `enter`, before step 2)
    /// 2. current state `execute`, then its transitions
    /// 3. end-state check
    ///
    /// Fails only if a `RETURN` fires with no previous state.
    pub fn tick(&mut self) -> Result<TickOutcome, ConfigError> {
        let tables = Arc::clone(&self.definition.tables);
        if self.finished {
            debug!(machine = %self.id, "Ticking a finished machine");
        }
        self.ticks += 1;
        let mut changes = Vec::new();

        if let (Some(global_id), Some(global)) = (tables.global, self.global.as_mut()) {
            global.execute(&tables.state(self.current).name);
            let exits = &tables.state(global_id).exits;
            if let Some(fired) = first_firing(&tables, exits) {
                changes.push(self.change_state(&tables, fired, ChangeSource::Overlay)?);
            }
        }

        self.active.execute(&tables.state(self.current).name);
        let exits = &tables.state(self.current).exits;
        if let Some(fired) = first_firing(&tables, exits) {
            changes.push(self.change_state(&tables, fired, ChangeSource::State)?);
        }

        if tables.is_end(self.current) {
            self.finished = true;
        }

        Ok(TickOutcome {
            changes,
            finished: self.finished,
        })
    }

    fn change_state(
        &mut self,
        tables: &Tables<E>,
        fired: TransitionId,
        source: ChangeSource,
    ) -> Result<StateChange, ConfigError> {
        let transition = tables.transition(fired);
        let from = self.current;

        self.active.exit(&transition.name);

        let destination = match transition.target {
            Target::State(id) => id,
            Target::Return => match self.previous {
                Some(id) => id,
                None => {
                    let error = ConfigError::UnresolvedReturn {
                        transition: transition.name.clone(),
                        from: tables.state(from).name.clone(),
                    };
                    warn!(machine = %self.id, error = %error, "State change failed");
                    return Err(error);
                }
            },
        };

        self.previous = Some(from);
        self.current = destination;
        self.active = tables.state(destination).instantiate(self.entity.clone());
        self.active.enter();

        let change = StateChange {
            machine: self.id,
            from: tables.state(from).name.clone(),
            to: tables.state(destination).name.clone(),
            reason: transition.name.clone(),
            source,
            tick: self.ticks,
            at: Utc::now(),
        };

        info!(
            machine = %self.id,
            label = tables.label.as_deref().unwrap_or("-"),
            from = %change.from,
            to = %change.to,
            reason = %change.reason,
            source = %change.source,
            tick = change.tick,
            "State changed"
        );

        for observer in &mut self.observers {
            observer(&change);
        }

        Ok(change)
    }
}

impl<E> StateMachine<E> {
    /// Register a callback invoked after every state change.
    pub fn on_state_change<F>(&mut self, observer: F)
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Name of the current state.
    pub fn current_state_name(&self) -> &StateName {
        &self.definition.tables.state(self.current).name
    }

    /// Name of the state active before the current one, if any.
    pub fn previous_state_name(&self) -> Option<&StateName> {
        self.previous
            .map(|id| &self.definition.tables.state(id).name)
    }

    /// Whether an end state has been reached.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Driver bookkeeping state.
    pub fn status(&self) -> DriverStatus {
        if self.finished {
            DriverStatus::Finished
        } else {
            DriverStatus::Running
        }
    }

    /// Number of ticks performed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Identifier attached to this machine's log events.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The entity handle this machine drives.
    pub fn entity(&self) -> &E {
        &self.entity
    }

    /// The definition this machine was started from.
    pub fn definition(&self) -> &Definition<E> {
        &self.definition
    }
}
