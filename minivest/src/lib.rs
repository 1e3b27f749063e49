//! Reactive form validation state.
//!
//! `minivest` binds a form value signal to a pure validation suite and
//! exposes a memoized [`RunResult`] with per-field and whole-form
//! validation status, touched tracking, error display gating, and a
//! path-addressed setter for nested form values.
//!
//! Touched state is either tracked by the instance itself
//! ([`Minivest::new`]) or delegated to an external control tree
//! ([`Minivest::with_controls`]), in which case validation errors are also
//! pushed into the controls' error slots.

pub mod builder;
pub mod config;
pub mod control;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod path;
pub mod run_result;
pub mod signal;
pub mod suite;
pub mod touch;
pub mod value;

pub use builder::{FormSource, Minivest, Mode};
pub use run_result::RunResult;

pub mod prelude {
    pub use crate::builder::{FormSource, Minivest, Mode};
    pub use crate::config::MinivestConfig;
    pub use crate::control::{
        Control, ControlErrors, ControlGroup, ControlTree, ControlTreeHandle, FormControl,
    };
    pub use crate::diagnostics::Misuse;
    pub use crate::error::{ModelError, PathError};
    pub use crate::event::{FormSubmit, SubmitEvent};
    pub use crate::path::{get_at_path, list_all_paths, resolve_segments, set_at_path};
    pub use crate::run_result::RunResult;
    pub use crate::signal::{ReadSignal, Signal};
    pub use crate::suite::{Checks, Suite, SuiteResult};
    pub use crate::touch::{TouchTracker, TouchedSet};
    pub use crate::value::{Record, Value};
}
