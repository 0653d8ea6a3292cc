//! Core vocabulary shared by the builder and the driver.
//!
//! This module contains the pieces a host implements or passes in:
//! - Case-insensitive state and transition names
//! - The `StateBehavior` lifecycle trait and behavior factories
//! - Transition predicates
//! - State change events

mod behavior;
mod event;
mod name;
mod predicate;

pub use behavior::{factory, BehaviorFactory, Passive, StateBehavior};
pub use event::{ChangeSource, StateChange};
pub use name::{Destination, StateName, TransitionName, GLOBAL, RETURN};
pub use predicate::Predicate;
