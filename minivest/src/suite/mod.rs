//! Validation suite contract.
//!
//! A suite is a pure function from the current form value (and an optional
//! field filter) to a [`SuiteResult`]. The adapter never looks inside the
//! rules; it only queries the result.
//!
//! # Example
//!
//! ```
//! use minivest::suite::{Checks, Suite, SuiteResult};
//! use minivest::value::Value;
//!
//! fn signup(model: &Value, field: Option<&str>) -> SuiteResult {
//!     let email = model
//!         .as_record()
//!         .and_then(|r| r.get("email"))
//!         .and_then(Value::as_str)
//!         .unwrap_or_default();
//!
//!     let mut checks = Checks::new(field);
//!     checks.test("email", "Email is required", || !email.is_empty());
//!     checks.finish()
//! }
//!
//! let result = signup.run(&Value::Null, None);
//! assert!(result.has_errors(Some("email")));
//! ```

mod checks;
mod result;

pub use checks::Checks;
pub use result::SuiteResult;

use crate::value::Value;

/// A pure validation function over a form value.
///
/// When `field` is `Some`, the suite may restrict itself to the checks of
/// that field. This is an optimization only: running everything must not
/// change the answer for that field.
///
/// Suites are expected not to panic. A panic propagates to whoever reads
/// the run result.
pub trait Suite: Send + Sync {
    fn run(&self, model: &Value, field: Option<&str>) -> SuiteResult;
}

impl<F> Suite for F
where
    F: Fn(&Value, Option<&str>) -> SuiteResult + Send + Sync,
{
    fn run(&self, model: &Value, field: Option<&str>) -> SuiteResult {
        self(model, field)
    }
}
