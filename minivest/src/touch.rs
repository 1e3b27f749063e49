//! Touched-field tracking.

use indexmap::IndexSet;

use crate::signal::Signal;

/// Paths that have been interacted with, in the order they were touched.
///
/// Absence means untouched.
pub type TouchedSet = IndexSet<String>;

/// Records which field paths have been touched.
///
/// Touched state only grows: there is no way to untouch a field. A form
/// that needs a clean slate creates a new [`Minivest`](crate::Minivest).
///
/// Writes that would not change the set are skipped, so they do not bump
/// the version and do not cause a recomputation.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    touched: Signal<TouchedSet>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a single path as touched.
    pub fn mark_touched(&self, path: &str) {
        if self.is_touched(path) {
            return;
        }
        self.touched.update(|set| {
            set.insert(path.to_string());
        });
    }

    /// Mark every given path as touched in one write.
    pub fn mark_all_touched<I, S>(&self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fresh: Vec<String> = self.touched.with(|set| {
            paths
                .into_iter()
                .map(Into::<String>::into)
                .filter(|path| !set.contains(path))
                .collect()
        });
        if fresh.is_empty() {
            return;
        }

        log::debug!("Marking {} paths touched", fresh.len());
        self.touched.update(|set| set.extend(fresh));
    }

    pub fn is_touched(&self, path: &str) -> bool {
        self.touched.with(|set| set.contains(path))
    }

    /// Copy of the current touched set.
    pub fn snapshot(&self) -> TouchedSet {
        self.touched.get()
    }

    /// Number of writes made to the touched set.
    pub fn version(&self) -> u64 {
        self.touched.version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_touched_is_idempotent() {
        let tracker = TouchTracker::new();
        tracker.mark_touched("email");
        let version = tracker.version();

        tracker.mark_touched("email");
        assert_eq!(tracker.version(), version);
        assert_eq!(tracker.snapshot().len(), 1);
    }

    #[test]
    fn test_mark_all_touched_is_one_write() {
        let tracker = TouchTracker::new();
        tracker.mark_touched("email");

        tracker.mark_all_touched(["email", "verifyEmail", "name"]);
        assert_eq!(tracker.version(), 2);
        assert!(tracker.is_touched("verifyEmail"));
        assert!(tracker.is_touched("name"));

        tracker.mark_all_touched(vec![String::from("name")]);
        assert_eq!(tracker.version(), 2);
    }

    #[test]
    fn test_untouched_by_default() {
        let tracker = TouchTracker::new();
        assert!(!tracker.is_touched("email"));
        assert!(tracker.snapshot().is_empty());
    }
}
