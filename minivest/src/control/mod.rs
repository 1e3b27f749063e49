//! External control trees.
//!
//! A host UI may keep its own per-field controls, each with touched/dirty
//! flags and an error slot. In delegated mode the adapter reads touched
//! state from those controls and pushes validation errors into their error
//! slots, but never creates or removes controls.

mod group;
mod sync;

pub use group::{Control, ControlGroup};
pub use sync::sync_errors;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::signal::Signal;

/// Keyed error payloads installed on a control.
pub type ControlErrors = IndexMap<String, String>;

/// A single field control owned by the host.
pub trait FormControl: Send + Sync {
    /// Whether the field has been interacted with.
    fn touched(&self) -> bool;

    /// Whether the field value has been changed by the user.
    fn dirty(&self) -> bool;

    /// Current error slot contents.
    fn errors(&self) -> Option<ControlErrors>;

    /// Replace the error slot. `None` clears it.
    fn set_errors(&self, errors: Option<ControlErrors>);
}

/// A path-queryable collection of controls owned by the host.
pub trait ControlTree: Send + Sync {
    /// The control registered under `path`, if any.
    fn control(&self, path: &str) -> Option<Arc<dyn FormControl>>;

    /// Paths of all currently registered controls.
    fn paths(&self) -> Vec<String>;

    /// Counter bumped whenever controls are registered or removed.
    ///
    /// Trees that never change shape can keep the default.
    fn revision(&self) -> u64 {
        0
    }
}

/// Handle to a control tree that may not exist yet.
///
/// A UI typically builds its controls after the form state exists, so the
/// handle starts out unmounted and is mounted later. Clones share the same
/// slot.
#[derive(Clone, Default)]
pub struct ControlTreeHandle {
    tree: Signal<Option<Arc<dyn ControlTree>>>,
}

impl ControlTreeHandle {
    /// Create an unmounted handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle already holding `tree`.
    pub fn mounted(tree: impl ControlTree + 'static) -> Self {
        let handle = Self::new();
        handle.mount(tree);
        handle
    }

    pub fn mount(&self, tree: impl ControlTree + 'static) {
        self.tree.set(Some(Arc::new(tree)));
    }

    pub fn unmount(&self) {
        self.tree.set(None);
    }

    /// The currently mounted tree.
    pub fn current(&self) -> Option<Arc<dyn ControlTree>> {
        self.tree.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.tree.with(Option::is_some)
    }

    /// Number of mount/unmount operations.
    pub fn version(&self) -> u64 {
        self.tree.version()
    }
}

impl fmt::Debug for ControlTreeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlTreeHandle")
            .field("mounted", &self.is_mounted())
            .field("version", &self.version())
            .finish()
    }
}
