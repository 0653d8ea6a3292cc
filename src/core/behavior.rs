//! The `StateBehavior` trait implemented by every state's handler.
//!
//! A behavior is created fresh each time its state is entered, by a factory
//! that receives the machine's shared entity handle. The driver only ever
//! calls the three lifecycle methods below.

use super::name::{StateName, TransitionName};
use std::sync::Arc;

/// Per-state lifecycle handler.
///
/// # Lifecycle
///
/// - `enter` is called once, right after the behavior is constructed on
///   entry into its state. It is never called for the `GLOBAL` overlay.
/// - `execute` is called once per tick while the state is active.
/// - `exit` is called once when a transition leaves the state, with the
///   name of the transition that fired.
///
/// # Example
///
/// ```rust
/// use ticksm::{StateBehavior, StateName, TransitionName};
/// use std::sync::{Arc, Mutex};
///
/// struct Counting {
///     counter: Arc<Mutex<u32>>,
/// }
///
/// impl StateBehavior for Counting {
///     fn enter(&mut self) {
///         *self.counter.lock().unwrap() = 0;
///     }
///
///     fn execute(&mut self, _current: &StateName) {
///         *self.counter.lock().unwrap() += 1;
///     }
///
///     fn exit(&mut self, _reason: &TransitionName) {}
/// }
/// ```
pub trait StateBehavior: Send {
    /// Called once on entry. Default does nothing.
    fn enter(&mut self) {}

    /// Called every tick while active.
    ///
    /// `current` is the machine's current state. For a regular state that
    /// is its own name; for the overlay it is the state being polled over.
    fn execute(&mut self, current: &StateName);

    /// Called once when leaving, with the transition that fired.
    /// Default does nothing.
    fn exit(&mut self, _reason: &TransitionName) {}
}

/// Shared constructor producing a fresh behavior from the entity handle.
pub type BehaviorFactory<E> = Arc<dyn Fn(E) -> Box<dyn StateBehavior> + Send + Sync>;

/// Wrap a typed constructor into a [`BehaviorFactory`].
pub fn factory<E, B, F>(construct: F) -> BehaviorFactory<E>
where
    B: StateBehavior + 'static,
    F: Fn(E) -> B + Send + Sync + 'static,
{
    Arc::new(move |entity| Box::new(construct(entity)) as Box<dyn StateBehavior>)
}

/// Behavior that does nothing; useful for pure waypoint states.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passive;

impl StateBehavior for Passive {
    fn execute(&mut self, _current: &StateName) {}
}
