//! First-match transition evaluation.

use crate::builder::definition::{Tables, TransitionId};

/// Return the first transition in `exits` whose predicate holds.
///
/// Predicates are asked in declared order and evaluation stops at the first
/// `true`; later predicates are not called. `None` means nothing fired,
/// which is the common case on most ticks.
pub(crate) fn first_firing<E>(tables: &Tables<E>, exits: &[TransitionId]) -> Option<TransitionId> {
    exits
        .iter()
        .copied()
        .find(|&id| tables.transition(id).predicate.check())
}
