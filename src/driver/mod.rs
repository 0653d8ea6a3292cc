//! The driver: a started machine and the per-tick lifecycle protocol.
//!
//! # Tick order
//!
//! - The `GLOBAL` overlay (if registered) executes and its transitions are
//!   checked first. A change it triggers is fully applied before the
//!   current state runs, so the freshly entered state is the one that
//!   executes later in the same tick.
//! - The current state executes and its exit transitions are checked in
//!   declared order; the first predicate that holds wins.
//! - Reaching an end state marks the machine finished.

mod evaluate;
mod machine;

pub use machine::{DriverStatus, StateMachine, TickOutcome};
