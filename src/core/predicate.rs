//! Predicates that decide whether a transition fires.
//!
//! A predicate is a zero-argument boolean query, usually closed over
//! host or entity state. The driver treats it as pure: it is asked in
//! declared order and evaluation stops at the first `true`.

use std::fmt;
use std::sync::Arc;

/// Shared boolean query guarding a transition.
///
/// # Example
///
/// ```rust
/// use ticksm::Predicate;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let watched = Arc::clone(&flag);
/// let predicate = Predicate::new(move || watched.load(Ordering::SeqCst));
///
/// assert!(!predicate.check());
/// flag.store(true, Ordering::SeqCst);
/// assert!(predicate.check());
/// ```
#[derive(Clone)]
pub struct Predicate {
    query: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl Predicate {
    /// Create a predicate from a closure.
    pub fn new<F>(query: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Predicate {
            query: Arc::new(query),
        }
    }

    /// Predicate that always fires.
    pub fn always() -> Self {
        Self::new(|| true)
    }

    /// Predicate that never fires.
    pub fn never() -> Self {
        Self::new(|| false)
    }

    /// Evaluate the query.
    pub fn check(&self) -> bool {
        (self.query)()
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}

impl<F> From<F> for Predicate
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    fn from(query: F) -> Self {
        Self::new(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[test]
    fn constant_predicates() {
        assert!(Predicate::always().check());
        assert!(!Predicate::never().check());
    }

    #[test]
    fn predicate_observes_shared_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let watched = Arc::clone(&flag);
        let predicate = Predicate::new(move || watched.load(Ordering::SeqCst));

        assert!(!predicate.check());
        flag.store(true, Ordering::SeqCst);
        assert!(predicate.check());
    }

    #[test]
    fn clones_share_the_same_query() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let predicate = Predicate::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
            true
        });
        let copy = predicate.clone();

        predicate.check();
        copy.check();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn closures_convert_into_predicates() {
        let predicate: Predicate = (|| true).into();
        assert!(predicate.check());
    }
}
