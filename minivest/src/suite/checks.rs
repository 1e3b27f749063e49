use super::SuiteResult;

/// Collector for writing suites as a list of checks.
///
/// Each check names a field, a message and a predicate. Failing predicates
/// add the message to the result. When the collector is created with a
/// field filter, checks for other fields are skipped without evaluating
/// their predicates.
///
/// # Example
///
/// ```
/// use minivest::suite::Checks;
///
/// let (email, verify) = ("a@b.co", "a@c.co");
///
/// let mut checks = Checks::new(None);
/// checks
///     .test("email", "Email is required", || !email.is_empty())
///     .test("verifyEmail", "Email addresses must match", || email == verify)
///     .warn("email", "Consider a work address", || !email.ends_with(".co"));
///
/// let result = checks.finish();
/// assert_eq!(result.get_errors(Some("verifyEmail")), vec!["Email addresses must match"]);
/// assert_eq!(result.warn_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Checks<'a> {
    only: Option<&'a str>,
    result: SuiteResult,
}

impl<'a> Checks<'a> {
    /// Create a collector, optionally restricted to a single field.
    pub fn new(only: Option<&'a str>) -> Self {
        Self {
            only,
            result: SuiteResult::new(),
        }
    }

    /// Whether checks for `field` run under the current filter.
    pub fn runs(&self, field: &str) -> bool {
        self.only.is_none_or(|only| only == field)
    }

    /// Add an error-level check.
    pub fn test<F>(&mut self, field: &str, message: impl Into<String>, passes: F) -> &mut Self
    where
        F: FnOnce() -> bool,
    {
        if self.runs(field) && !passes() {
            self.result.add_error(field, message);
        }
        self
    }

    /// Add a warning-level check. Failures never make the result invalid.
    pub fn warn<F>(&mut self, field: &str, message: impl Into<String>, passes: F) -> &mut Self
    where
        F: FnOnce() -> bool,
    {
        if self.runs(field) && !passes() {
            self.result.add_warning(field, message);
        }
        self
    }

    /// Finish collecting and return the result.
    pub fn finish(self) -> SuiteResult {
        self.result
    }
}
