//! Builder API for assembling and validating machine definitions.
//!
//! A [`MachineBuilder`] collects states, transitions, the start state and
//! end states in any order. [`MachineBuilder::build`] checks every
//! cross-reference and freezes the result into a [`Definition`], which can
//! start any number of machines.

pub mod definition;
pub mod error;
pub mod machine;

pub use definition::Definition;
pub use error::ConfigError;
pub use machine::MachineBuilder;
