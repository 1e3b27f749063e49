//! The derived run-result cell.

use std::fmt;
use std::sync::{Arc, Mutex};

use indexmap::IndexMap;

use crate::config::MinivestConfig;
use crate::control::{ControlTreeHandle, sync_errors};
use crate::diagnostics::{DevWarnings, Misuse};
use crate::path::list_all_paths;
use crate::run_result::{RunResult, ShowErrors};
use crate::signal::{ReadSignal, Signal};
use crate::suite::Suite;
use crate::touch::TouchTracker;
use crate::value::Value;

/// The form value container a [`Minivest`] reads from.
///
/// Only a writable source supports `set_value`.
#[derive(Debug, Clone)]
pub enum FormSource {
    Writable(Signal<Value>),
    ReadOnly(ReadSignal<Value>),
}

impl FormSource {
    pub fn get(&self) -> Value {
        match self {
            FormSource::Writable(signal) => signal.get(),
            FormSource::ReadOnly(signal) => signal.get(),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        match self {
            FormSource::Writable(signal) => signal.with(f),
            FormSource::ReadOnly(signal) => signal.with(f),
        }
    }

    pub fn version(&self) -> u64 {
        match self {
            FormSource::Writable(signal) => signal.version(),
            FormSource::ReadOnly(signal) => signal.version(),
        }
    }

    /// The writable signal, if this source is writable.
    pub fn writable(&self) -> Option<&Signal<Value>> {
        match self {
            FormSource::Writable(signal) => Some(signal),
            FormSource::ReadOnly(_) => None,
        }
    }
}

impl From<Signal<Value>> for FormSource {
    fn from(signal: Signal<Value>) -> Self {
        FormSource::Writable(signal)
    }
}

impl From<ReadSignal<Value>> for FormSource {
    fn from(signal: ReadSignal<Value>) -> Self {
        FormSource::ReadOnly(signal)
    }
}

/// Where touched state comes from. Fixed for the lifetime of an instance.
#[derive(Debug, Clone)]
pub enum Mode {
    /// Touched state is owned by the instance.
    SelfTracked(TouchTracker),
    /// Touched state is read from an external control tree, and validation
    /// errors are pushed into it on every recomputation.
    Delegated(ControlTreeHandle),
}

/// State shared between a [`Minivest`] and the run results it produced.
pub(crate) struct Shared {
    pub(crate) form: FormSource,
    pub(crate) suite: Arc<dyn Suite>,
    pub(crate) mode: Mode,
    pub(crate) config: MinivestConfig,
    pub(crate) warnings: DevWarnings,
}

impl Shared {
    pub(crate) fn warn_once(&self, misuse: Misuse) {
        self.warnings.warn_once(misuse, self.config.dev_mode);
    }
}

/// Dependency versions a run result was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MemoKey {
    form: u64,
    touch: u64,
    tree_revision: u64,
}

/// Reactive form validation state.
///
/// `Minivest` binds a form value signal to a validation suite. Every
/// [`read`](Minivest::read) returns a [`RunResult`] for the current form
/// value and touched state. Results are memoized: while neither the form
/// value nor the touched state (or, in delegated mode, the mounted control
/// tree) changed, reads return the same `Arc` without running the suite.
///
/// # Example
///
/// ```
/// use minivest::prelude::*;
///
/// fn suite(model: &Value, field: Option<&str>) -> SuiteResult {
///     let email = get_at_path(model, "email").and_then(Value::as_str).unwrap_or_default();
///     let mut checks = Checks::new(field);
///     checks.test("email", "Email is required", || !email.is_empty());
///     checks.finish()
/// }
///
/// let form = Signal::new(Value::from(Record::new().set("email", "")));
/// let minivest = Minivest::new(form.clone(), suite);
///
/// let result = minivest.read();
/// assert!(result.has_errors(Some("email")));
/// assert!(!result.show_errors(Some("email")));
///
/// result.set_touched("email").unwrap();
/// assert!(minivest.read().show_errors(Some("email")));
///
/// minivest.read().set_value("email", "ada@example.com").unwrap();
/// assert!(minivest.read().is_valid());
/// ```
pub struct Minivest {
    shared: Arc<Shared>,
    memo: Mutex<Option<(MemoKey, Arc<RunResult>)>>,
}

impl Minivest {
    /// Create an instance that tracks touched fields itself.
    pub fn new(form: impl Into<FormSource>, suite: impl Suite + 'static) -> Self {
        Self::from_parts(
            form.into(),
            Arc::new(suite),
            Mode::SelfTracked(TouchTracker::new()),
            MinivestConfig::default(),
        )
    }

    /// Create an instance that delegates touched state to a control tree.
    pub fn with_controls(
        form: impl Into<FormSource>,
        suite: impl Suite + 'static,
        controls: ControlTreeHandle,
    ) -> Self {
        Self::from_parts(
            form.into(),
            Arc::new(suite),
            Mode::Delegated(controls),
            MinivestConfig::default(),
        )
    }

    /// Replace the configuration. Discards any memoized result.
    pub fn with_config(self, config: MinivestConfig) -> Self {
        let shared = &self.shared;
        Self::from_parts(
            shared.form.clone(),
            Arc::clone(&shared.suite),
            shared.mode.clone(),
            config,
        )
    }

    fn from_parts(
        form: FormSource,
        suite: Arc<dyn Suite>,
        mode: Mode,
        config: MinivestConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                form,
                suite,
                mode,
                config,
                warnings: DevWarnings::default(),
            }),
            memo: Mutex::new(None),
        }
    }

    /// The current run result, recomputed only if a dependency changed.
    pub fn read(&self) -> Arc<RunResult> {
        let key = self.memo_key();
        if let Some(cached) = self.cached(key) {
            return cached;
        }

        // The suite runs without the memo lock held, so a panicking suite
        // leaves the instance usable.
        let result = Arc::new(self.compute(key));
        let mut memo = self
            .memo
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *memo = Some((key, Arc::clone(&result)));
        result
    }

    pub fn mode(&self) -> &Mode {
        &self.shared.mode
    }

    pub fn config(&self) -> &MinivestConfig {
        &self.shared.config
    }

    pub fn form(&self) -> &FormSource {
        &self.shared.form
    }

    /// The owned touch tracker, when running self-tracked.
    pub fn touch_tracker(&self) -> Option<&TouchTracker> {
        match &self.shared.mode {
            Mode::SelfTracked(tracker) => Some(tracker),
            Mode::Delegated(_) => None,
        }
    }

    /// Whether the given misuse warning has been logged by this instance.
    pub fn has_warned(&self, misuse: Misuse) -> bool {
        self.shared.warnings.has_warned(misuse)
    }

    fn memo_key(&self) -> MemoKey {
        let form = self.shared.form.version();
        match &self.shared.mode {
            Mode::SelfTracked(tracker) => MemoKey {
                form,
                touch: tracker.version(),
                tree_revision: 0,
            },
            Mode::Delegated(handle) => MemoKey {
                form,
                touch: handle.version(),
                tree_revision: handle.current().map_or(0, |tree| tree.revision()),
            },
        }
    }

    fn cached(&self, key: MemoKey) -> Option<Arc<RunResult>> {
        let memo = self
            .memo
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        memo.as_ref()
            .filter(|(cached_key, _)| *cached_key == key)
            .map(|(_, result)| Arc::clone(result))
    }

    fn compute(&self, key: MemoKey) -> RunResult {
        log::debug!(
            "Recomputing run result (form v{}, touch v{}, tree r{})",
            key.form,
            key.touch,
            key.tree_revision
        );

        let value = self.shared.form.get();
        let result = Arc::new(self.shared.suite.run(&value, None));

        let show_errors = match &self.shared.mode {
            Mode::SelfTracked(tracker) => {
                let touched = tracker.snapshot();
                let shown: IndexMap<String, bool> = list_all_paths(&value)
                    .into_iter()
                    .map(|path| {
                        let show = result.has_errors(Some(&path)) && touched.contains(&path);
                        (path, show)
                    })
                    .collect();
                ShowErrors::Tracked { touched, shown }
            }
            Mode::Delegated(handle) => {
                let tree = handle.current();
                if let Some(tree) = &tree {
                    sync_errors(tree.as_ref(), &result, &self.shared.config.error_key);
                }
                ShowErrors::Delegated { tree }
            }
        };

        RunResult::new(Arc::clone(&self.shared), value, key.form, result, show_errors)
    }
}

impl fmt::Debug for Minivest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Minivest")
            .field("form", &self.shared.form)
            .field("mode", &self.shared.mode)
            .field("config", &self.shared.config)
            .finish_non_exhaustive()
    }
}
