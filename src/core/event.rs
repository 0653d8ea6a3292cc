//! State change events.
//!
//! Every state change performed by a running machine is described by a
//! [`StateChange`]. It is logged through `tracing`, handed to any
//! registered observer, and returned from `tick()`.

use super::name::{StateName, TransitionName};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Which transition list produced a change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeSource {
    /// A transition owned by the `GLOBAL` overlay.
    Overlay,
    /// A transition owned by the current state.
    State,
}

impl fmt::Display for ChangeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeSource::Overlay => f.write_str("overlay"),
            ChangeSource::State => f.write_str("state"),
        }
    }
}

/// Record of a single state change.
#[derive(Clone, Debug, Serialize)]
pub struct StateChange {
    /// The machine that changed.
    pub machine: Uuid,
    /// The state being left
    pub from: StateName,
    /// The state being entered, with `RETURN` already resolved
    pub to: StateName,
    /// The transition that fired
    pub reason: TransitionName,
    /// Whether the overlay or the current state owned the transition
    pub source: ChangeSource,
    /// Index of the tick during which the change happened (first tick is 1)
    pub tick: u64,
    /// When the change happened
    pub at: DateTime<Utc>,
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StateChange {
        StateChange {
            machine: Uuid::nil(),
            from: StateName::new("idle"),
            to: StateName::new("running"),
            reason: TransitionName::new("go"),
            source: ChangeSource::State,
            tick: 1,
            at: Utc::now(),
        }
    }

    #[test]
    fn display_reads_old_to_new() {
        assert_eq!(sample().to_string(), "IDLE -> RUNNING (GO)");
    }

    #[test]
    fn change_serializes_with_plain_names() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["from"], "IDLE");
        assert_eq!(json["to"], "RUNNING");
        assert_eq!(json["reason"], "GO");
        assert_eq!(json["source"], "state");
        assert_eq!(json["tick"], 1);
    }
}
