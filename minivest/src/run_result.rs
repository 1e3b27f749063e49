//! Run result snapshots.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::builder::{Mode, Shared};
use crate::control::ControlTree;
use crate::diagnostics::Misuse;
use crate::error::{ModelError, PathError};
use crate::event::SubmitEvent;
use crate::path::{list_all_paths, resolve_segments, set_at_path};
use crate::suite::SuiteResult;
use crate::touch::TouchedSet;
use crate::value::Value;

/// How `show_errors` is answered for a snapshot.
pub(crate) enum ShowErrors {
    /// Precomputed for every path of the form value.
    Tracked {
        touched: TouchedSet,
        shown: IndexMap<String, bool>,
    },
    /// Answered on demand against the live controls.
    Delegated { tree: Option<Arc<dyn ControlTree>> },
}

/// An immutable snapshot of validation and interaction state.
///
/// Produced by [`Minivest::read`](crate::Minivest::read). The snapshot never
/// changes; the actions on it (`set_value`, `set_touched`, `submit`) write
/// to the instance's form signal or touch tracker, and the next `read`
/// reflects them.
pub struct RunResult {
    shared: Arc<Shared>,
    value: Value,
    form_version: u64,
    result: Arc<SuiteResult>,
    show_errors: ShowErrors,
}

impl RunResult {
    pub(crate) fn new(
        shared: Arc<Shared>,
        value: Value,
        form_version: u64,
        result: Arc<SuiteResult>,
        show_errors: ShowErrors,
    ) -> Self {
        Self {
            shared,
            value,
            form_version,
            result,
            show_errors,
        }
    }

    // =========================================================================
    // Validation outcome
    // =========================================================================

    pub fn suite_result(&self) -> &SuiteResult {
        &self.result
    }

    pub fn has_errors(&self, path: Option<&str>) -> bool {
        self.result.has_errors(path)
    }

    pub fn get_errors(&self, path: Option<&str>) -> Vec<&str> {
        self.result.get_errors(path)
    }

    pub fn has_warnings(&self, path: Option<&str>) -> bool {
        self.result.has_warnings(path)
    }

    pub fn get_warnings(&self, path: Option<&str>) -> Vec<&str> {
        self.result.get_warnings(path)
    }

    pub fn is_valid(&self) -> bool {
        self.result.is_valid()
    }

    pub fn error_count(&self) -> usize {
        self.result.error_count()
    }

    pub fn warn_count(&self) -> usize {
        self.result.warn_count()
    }

    // =========================================================================
    // Snapshot state
    // =========================================================================

    /// The form value this snapshot was computed from.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The form value read into a typed model.
    pub fn model<T: DeserializeOwned>(&self) -> Result<T, ModelError> {
        self.value.to_model()
    }

    pub fn mode(&self) -> &Mode {
        &self.shared.mode
    }

    /// Touched paths at the time of the snapshot. `None` when delegated.
    pub fn touched_fields(&self) -> Option<&TouchedSet> {
        match &self.show_errors {
            ShowErrors::Tracked { touched, .. } => Some(touched),
            ShowErrors::Delegated { .. } => None,
        }
    }

    /// Whether errors should be displayed.
    ///
    /// For a path: the path has errors and has been touched. Self-tracked
    /// instances answer from the snapshot, covering the paths present in the
    /// form value. Delegated instances ask the live control on every call,
    /// so touching a control is visible without a new `read`.
    ///
    /// Without a path: self-tracked instances report whether any field
    /// shows errors; delegated instances report whether the form has errors.
    pub fn show_errors(&self, path: Option<&str>) -> bool {
        match (&self.show_errors, path) {
            (ShowErrors::Tracked { shown, .. }, Some(path)) => {
                shown.get(path).copied().unwrap_or(false)
            }
            (ShowErrors::Tracked { shown, .. }, None) => shown.values().any(|show| *show),
            (ShowErrors::Delegated { tree }, Some(path)) => {
                self.result.has_errors(Some(path))
                    && tree
                        .as_ref()
                        .and_then(|tree| tree.control(path))
                        .is_some_and(|control| control.touched())
            }
            (ShowErrors::Delegated { .. }, None) => self.result.has_errors(None),
        }
    }

    /// The full path → shown map. `None` when delegated.
    pub fn show_errors_map(&self) -> Option<&IndexMap<String, bool>> {
        match &self.show_errors {
            ShowErrors::Tracked { shown, .. } => Some(shown),
            ShowErrors::Delegated { .. } => None,
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Write `value` at `path` into the form signal.
    ///
    /// The write is applied to the signal's current value, not to this
    /// snapshot, with the read and the write under one write lock. On a
    /// read-only form this does nothing and logs a warning once in dev mode.
    pub fn set_value(&self, path: &str, value: impl Into<Value>) -> Result<(), PathError> {
        let Some(signal) = self.shared.form.writable() else {
            self.shared.warn_once(Misuse::ReadOnlySetValue);
            return Ok(());
        };

        signal.try_update(|current| {
            *current = set_at_path(current, path, value.into())?;
            Ok(())
        })
    }

    /// Mark `path` as touched.
    ///
    /// Delegated instances have no touched state of their own; the call
    /// does nothing and logs a warning once in dev mode.
    pub fn set_touched(&self, path: &str) -> Result<(), PathError> {
        match &self.shared.mode {
            Mode::SelfTracked(tracker) => {
                resolve_segments(path)?;
                tracker.mark_touched(path);
            }
            Mode::Delegated(_) => self.shared.warn_once(Misuse::DelegatedSetTouched),
        }
        Ok(())
    }

    /// Mark every path of the current form value as touched.
    pub fn set_all_touched(&self) {
        match &self.shared.mode {
            Mode::SelfTracked(tracker) => {
                tracker.mark_all_touched(self.shared.form.with(list_all_paths));
            }
            Mode::Delegated(_) => self.shared.warn_once(Misuse::DelegatedSetTouched),
        }
    }

    /// Handle a form submission.
    ///
    /// Suppresses the event's default action, marks every field touched
    /// (self-tracked only) and returns whether the form value *at the time
    /// of the call* is valid.
    pub fn submit<E: SubmitEvent + ?Sized>(&self, event: &mut E) -> bool {
        event.prevent_default();

        if let Mode::SelfTracked(tracker) = &self.shared.mode {
            tracker.mark_all_touched(self.shared.form.with(list_all_paths));
        }

        if self.shared.form.version() == self.form_version {
            return self.result.is_valid();
        }

        log::debug!("Form changed since snapshot, re-running suite for submit");
        self.shared
            .form
            .with(|current| self.shared.suite.run(current, None))
            .is_valid()
    }
}

impl fmt::Debug for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunResult")
            .field("value", &self.value)
            .field("result", &self.result)
            .field("show_errors", &self.show_errors_map())
            .finish_non_exhaustive()
    }
}
