//! Configuration errors raised while building or driving a machine.

use crate::core::{StateName, TransitionName};
use thiserror::Error;

/// Wiring mistakes in a machine definition.
///
/// These are never transient: they signal that the definition table is
/// inconsistent and should abort machine construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Start state not specified. Call .set_start(name) before .start()")]
    MissingStartState,

    #[error("Start state '{0}' is not registered")]
    UnknownStartState(StateName),

    #[error("State '{state}' lists exit transition '{transition}' which is not registered")]
    UnknownTransition {
        state: StateName,
        transition: TransitionName,
    },

    #[error("Transition '{transition}' leads to unregistered state '{destination}'")]
    UnknownDestination {
        transition: TransitionName,
        destination: StateName,
    },

    #[error("End state '{0}' is not registered")]
    UnknownEndState(StateName),

    #[error("'{name}' is reserved and cannot be used as {usage}")]
    ReservedName {
        name: StateName,
        usage: &'static str,
    },

    #[error("Transition '{transition}' from '{from}' returned, but there is no previous state")]
    UnresolvedReturn {
        transition: TransitionName,
        from: StateName,
    },

    #[error("{} configuration errors: {}", .0.len(), join(.0))]
    Invalid(Vec<ConfigError>),
}

impl ConfigError {
    /// Collapse a list of problems into a single error.
    ///
    /// Returns `None` when the list is empty.
    pub(crate) fn from_problems(mut problems: Vec<ConfigError>) -> Option<Self> {
        match problems.len() {
            0 => None,
            1 => problems.pop(),
            _ => Some(ConfigError::Invalid(problems)),
        }
    }

    /// All individual problems carried by this error.
    pub fn problems(&self) -> Vec<&ConfigError> {
        match self {
            ConfigError::Invalid(problems) => problems.iter().collect(),
            other => vec![other],
        }
    }
}

fn join(problems: &[ConfigError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_problem_is_returned_as_is() {
        let error = ConfigError::from_problems(vec![ConfigError::MissingStartState]);
        assert_eq!(error, Some(ConfigError::MissingStartState));
    }

    #[test]
    fn no_problems_is_none() {
        assert_eq!(ConfigError::from_problems(Vec::new()), None);
    }

    #[test]
    fn several_problems_are_grouped() {
        let error = ConfigError::from_problems(vec![
            ConfigError::MissingStartState,
            ConfigError::UnknownEndState(StateName::new("done")),
        ])
        .unwrap();

        assert_eq!(error.problems().len(), 2);
        assert_eq!(
            error.to_string(),
            "2 configuration errors: Start state not specified. Call .set_start(name) before .start(); \
             End state 'DONE' is not registered"
        );
    }

    #[test]
    fn messages_name_the_offending_items() {
        let error = ConfigError::UnknownTransition {
            state: StateName::new("idle"),
            transition: TransitionName::new("go"),
        };
        assert_eq!(
            error.to_string(),
            "State 'IDLE' lists exit transition 'GO' which is not registered"
        );
    }
}
