use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use indexmap::map::Entry;

use super::{ControlErrors, ControlTree, FormControl};

/// Internal state for a Control
#[derive(Debug, Default)]
struct ControlInner {
    touched: bool,
    dirty: bool,
    errors: Option<ControlErrors>,
}

/// An in-memory field control.
///
/// Clones share state, so a control handed out by a [`ControlGroup`] can be
/// kept by a widget and updated as the user interacts with it.
#[derive(Debug, Clone, Default)]
pub struct Control {
    inner: Arc<RwLock<ControlInner>>,
}

impl Control {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the control as touched (typically on blur).
    pub fn mark_as_touched(&self) {
        self.write(|inner| inner.touched = true);
    }

    pub fn mark_as_untouched(&self) {
        self.write(|inner| inner.touched = false);
    }

    /// Mark the control as dirty (typically on change).
    pub fn mark_as_dirty(&self) {
        self.write(|inner| inner.dirty = true);
    }

    pub fn mark_as_pristine(&self) {
        self.write(|inner| inner.dirty = false);
    }

    /// Check if the error slot holds anything.
    pub fn has_error(&self) -> bool {
        self.read(|inner| inner.errors.is_some())
    }

    /// Payload stored under `key` in the error slot.
    pub fn error(&self, key: &str) -> Option<String> {
        self.read(|inner| inner.errors.as_ref().and_then(|e| e.get(key).cloned()))
    }

    fn read<R>(&self, f: impl FnOnce(&ControlInner) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&*guard),
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }

    fn write(&self, f: impl FnOnce(&mut ControlInner)) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut *guard);
    }
}

impl FormControl for Control {
    fn touched(&self) -> bool {
        self.read(|inner| inner.touched)
    }

    fn dirty(&self) -> bool {
        self.read(|inner| inner.dirty)
    }

    fn errors(&self) -> Option<ControlErrors> {
        self.read(|inner| inner.errors.clone())
    }

    fn set_errors(&self, errors: Option<ControlErrors>) {
        self.write(|inner| inner.errors = errors);
    }
}

/// A flat group of controls addressed by field path.
///
/// # Example
///
/// ```
/// use minivest::control::{ControlGroup, ControlTree, FormControl};
///
/// let group = ControlGroup::new();
/// let email = group.register("email");
/// email.mark_as_touched();
///
/// let control = group.control("email").unwrap();
/// assert!(control.touched());
/// assert_eq!(group.paths(), vec!["email"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ControlGroup {
    controls: Arc<RwLock<IndexMap<String, Control>>>,
    revision: Arc<AtomicU64>,
}

impl ControlGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a control under `path`, returning the existing one if the
    /// path is already registered.
    pub fn register(&self, path: impl Into<String>) -> Control {
        let path = path.into();
        self.write(|controls| match controls.entry(path) {
            Entry::Occupied(entry) => (entry.get().clone(), false),
            Entry::Vacant(entry) => (entry.insert(Control::new()).clone(), true),
        })
    }

    /// Remove the control under `path`.
    pub fn remove(&self, path: &str) -> Option<Control> {
        self.write(|controls| {
            let removed = controls.shift_remove(path);
            let changed = removed.is_some();
            (removed, changed)
        })
    }

    pub fn get(&self, path: &str) -> Option<Control> {
        self.read(|controls| controls.get(path).cloned())
    }

    pub fn len(&self) -> usize {
        self.read(IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark every registered control as touched.
    pub fn mark_all_as_touched(&self) {
        self.read(|controls| controls.values().for_each(Control::mark_as_touched));
    }

    /// Mark every registered control as dirty.
    pub fn mark_all_as_dirty(&self) {
        self.read(|controls| controls.values().for_each(Control::mark_as_dirty));
    }

    fn read<R>(&self, f: impl FnOnce(&IndexMap<String, Control>) -> R) -> R {
        match self.controls.read() {
            Ok(guard) => f(&*guard),
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }

    /// Runs `f` under the write lock. The revision is bumped when `f`
    /// reports a change.
    fn write<R>(&self, f: impl FnOnce(&mut IndexMap<String, Control>) -> (R, bool)) -> R {
        let mut guard = self
            .controls
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let (result, changed) = f(&mut *guard);
        if changed {
            self.revision.fetch_add(1, Ordering::SeqCst);
        }
        result
    }
}

impl ControlTree for ControlGroup {
    fn control(&self, path: &str) -> Option<Arc<dyn FormControl>> {
        self.get(path)
            .map(|control| Arc::new(control) as Arc<dyn FormControl>)
    }

    fn paths(&self) -> Vec<String> {
        self.read(|controls| controls.keys().cloned().collect())
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_returns_existing() {
        let group = ControlGroup::new();
        let first = group.register("email");
        first.mark_as_touched();

        let again = group.register("email");
        assert!(again.touched());
        assert_eq!(group.len(), 1);
        assert_eq!(group.revision(), 1);
    }

    #[test]
    fn test_remove_bumps_revision() {
        let group = ControlGroup::new();
        group.register("email");
        assert!(group.remove("email").is_some());
        assert!(group.is_empty());
        assert_eq!(group.revision(), 2);
    }

    #[test]
    fn test_remove_missing_keeps_revision() {
        let group = ControlGroup::new();
        group.register("email");
        assert!(group.remove("phone").is_none());
        assert_eq!(group.revision(), 1);
    }

    #[test]
    fn test_concurrent_register_shares_control() {
        let group = ControlGroup::new();
        let barrier = std::sync::Barrier::new(8);

        let controls: Vec<Control> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        group.register("email")
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        controls[0].mark_as_touched();
        assert!(controls.iter().all(Control::touched));
        assert!(group.get("email").unwrap().touched());
        assert_eq!(group.len(), 1);
        assert_eq!(group.revision(), 1);
    }

    #[test]
    fn test_flags_can_be_reset() {
        let control = Control::new();
        control.mark_as_touched();
        control.mark_as_dirty();

        control.mark_as_untouched();
        control.mark_as_pristine();
        assert!(!control.touched());
        assert!(!control.dirty());
    }

    #[test]
    fn test_mark_all() {
        let group = ControlGroup::new();
        let a = group.register("a");
        let b = group.register("b");
        group.mark_all_as_touched();
        group.mark_all_as_dirty();
        assert!(a.touched() && b.touched());
        assert!(a.dirty() && b.dirty());
    }
}
