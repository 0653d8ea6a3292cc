//! Case-insensitive identifiers for states and transitions.
//!
//! Names are normalized to upper case on construction, so `"idle"`,
//! `"Idle"` and `"IDLE"` all refer to the same state.

use serde::Serialize;
use std::fmt;

/// Reserved name of the always-polled overlay state.
pub const GLOBAL: &str = "GLOBAL";

/// Reserved transition destination meaning "the previously active state".
pub const RETURN: &str = "RETURN";

macro_rules! normalized_name {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a name, normalizing it to upper case.
            pub fn new(name: impl AsRef<str>) -> Self {
                Self(name.as_ref().trim().to_uppercase())
            }

            /// The normalized (upper-case) form.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self::new(name)
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self::new(name)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other.trim().to_uppercase()
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                <Self as PartialEq<str>>::eq(self, other)
            }
        }
    };
}

normalized_name! {
    /// Name of a state in the definition table.
    StateName
}

normalized_name! {
    /// Name of a transition; also the "reason" handed to `exit`.
    TransitionName
}

impl StateName {
    /// Whether this is the reserved overlay state.
    pub fn is_global(&self) -> bool {
        self.0 == GLOBAL
    }

    /// Whether this collides with the reserved `RETURN` destination.
    pub fn is_return(&self) -> bool {
        self.0 == RETURN
    }
}

/// Where a transition leads, as registered.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub enum Destination {
    /// A literal state.
    State(StateName),
    /// Whatever state was active before the current one.
    Return,
}

impl Destination {
    /// Parse a destination, recognising `RETURN` in any case.
    pub fn parse(name: impl AsRef<str>) -> Self {
        let state = StateName::new(name);
        if state.is_return() {
            Destination::Return
        } else {
            Destination::State(state)
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::State(name) => fmt::Display::fmt(name, f),
            Destination::Return => f.write_str(RETURN),
        }
    }
}

impl From<&str> for Destination {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_normalized() {
        assert_eq!(StateName::new("idle"), StateName::new("IDLE"));
        assert_eq!(StateName::new("Idle").as_str(), "IDLE");
        assert_eq!(TransitionName::new("go").to_string(), "GO");
    }

    #[test]
    fn names_compare_against_raw_strings() {
        let name = StateName::new("running");
        assert_eq!(name, "Running");
        assert_eq!(name, "RUNNING");
        assert_ne!(name, "run");
    }

    #[test]
    fn global_is_recognised_in_any_case() {
        assert!(StateName::new("global").is_global());
        assert!(StateName::new("Global").is_global());
        assert!(!StateName::new("globals").is_global());
    }

    #[test]
    fn return_destination_is_case_insensitive() {
        assert_eq!(Destination::parse("return"), Destination::Return);
        assert_eq!(Destination::parse("RETURN"), Destination::Return);
        assert_eq!(
            Destination::parse("done"),
            Destination::State(StateName::new("DONE"))
        );
    }

    #[test]
    fn name_serializes_as_plain_string() {
        let json = serde_json::to_string(&StateName::new("chase")).unwrap();
        assert_eq!(json, "\"CHASE\"");
    }
}
