//! # Filters
//!
//! A [`Filter`] is a boxed predicate evaluated *inside* the actor task, so a
//! query or a staged deletion sees one consistent snapshot of the store.

use std::fmt;
use std::sync::Arc;

/// Predicate over an entity, shipped to the actor with `Query` and `Prepare` requests.
pub struct Filter<T> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
    label: &'static str,
}

impl<T> Filter<T> {
    /// Wraps a predicate. The label only shows up in logs.
    pub fn new(
        label: &'static str,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Arc::new(predicate),
            label,
        }
    }

    /// Matches every entity.
    pub fn all() -> Self {
        Self::new("all", |_| true)
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.predicate)(item)
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<T> Clone for Filter<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            label: self.label,
        }
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Filter").field(&self.label).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_and_debug() {
        let even = Filter::<u32>::new("even", |n| n % 2 == 0);
        assert!(even.matches(&4));
        assert!(!even.matches(&3));
        assert_eq!(format!("{:?}", even), "Filter(\"even\")");

        let all = Filter::<u32>::all();
        assert!(all.matches(&7));
        assert_eq!(all.clone().label(), "all");
    }
}
