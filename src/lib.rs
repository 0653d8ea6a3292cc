//! Ticksm: a tick-driven finite state machine engine
//!
//! A host declares named states, each with a behavior and an ordered list
//! of exit transitions, then drives an entity through them by calling
//! [`StateMachine::tick`] from its own loop.
//!
//! # Core Concepts
//!
//! - **State**: a named mode with a [`StateBehavior`] built fresh on every
//!   entry by a factory that receives the shared entity handle
//! - **Transition**: a named [`Predicate`] and destination; the first
//!   transition whose predicate holds fires
//! - **Global overlay**: a state named `GLOBAL` that executes and checks
//!   its own transitions before the current state on every tick
//! - **RETURN**: a destination meaning "the previous state" (one slot of
//!   history, not a stack)
//!
//! # Example
//!
//! ```rust
//! use ticksm::{MachineBuilder, Passive, Predicate};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let go = Arc::new(AtomicBool::new(false));
//! let go_flag = Arc::clone(&go);
//!
//! let mut machine = MachineBuilder::<()>::new()
//!     .add_state("idle", |_| Passive, ["go"])
//!     .add_state("running", |_| Passive, ["stop"])
//!     .add_state("done", |_| Passive, Vec::<&str>::new())
//!     .add_transition("go", move || go_flag.load(Ordering::SeqCst), "running")
//!     .add_transition("stop", Predicate::always(), "done")
//!     .set_start("idle")
//!     .set_end(["done"])
//!     .start(())?;
//!
//! machine.tick()?;
//! assert_eq!(machine.current_state_name(), "IDLE");
//!
//! go.store(true, Ordering::SeqCst);
//! machine.tick()?;
//! assert_eq!(machine.current_state_name(), "RUNNING");
//!
//! machine.tick()?;
//! assert!(machine.is_finished());
//! # Ok::<(), ticksm::ConfigError>(())
//! ```

pub mod builder;
pub mod core;
pub mod driver;

// Re-export commonly used types
pub use crate::builder::{ConfigError, Definition, MachineBuilder};
pub use crate::core::{
    factory, BehaviorFactory, ChangeSource, Destination, Passive, Predicate, StateBehavior,
    StateChange, StateName, TransitionName, GLOBAL, RETURN,
};
pub use crate::driver::{DriverStatus, StateMachine, TickOutcome};
