use indexmap::IndexMap;

/// Outcome of one suite run.
///
/// Messages are grouped per field in the order the checks reported them.
/// Queries taking `Option<&str>` are field-scoped for `Some` and cover the
/// whole form for `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuiteResult {
    errors: IndexMap<String, Vec<String>>,
    warnings: IndexMap<String, Vec<String>>,
}

impl SuiteResult {
    /// Create an empty (valid) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed check for `field`.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Record a failed warning-level check for `field`.
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Builder form of [`add_error`](Self::add_error).
    pub fn with_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add_error(field, message);
        self
    }

    /// Builder form of [`add_warning`](Self::add_warning).
    pub fn with_warning(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add_warning(field, message);
        self
    }

    pub fn has_errors(&self, field: Option<&str>) -> bool {
        has_messages(&self.errors, field)
    }

    pub fn get_errors(&self, field: Option<&str>) -> Vec<&str> {
        messages(&self.errors, field)
    }

    pub fn has_warnings(&self, field: Option<&str>) -> bool {
        has_messages(&self.warnings, field)
    }

    pub fn get_warnings(&self, field: Option<&str>) -> Vec<&str> {
        messages(&self.warnings, field)
    }

    /// First error reported for `field`, if any.
    pub fn first_error(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|errors| errors.first())
            .map(String::as_str)
    }

    /// `true` when no check failed. Warnings do not affect validity.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    /// Total number of error messages across all fields.
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Total number of warning messages across all fields.
    pub fn warn_count(&self) -> usize {
        self.warnings.values().map(Vec::len).sum()
    }

    pub fn errors_by_field(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors
    }

    pub fn warnings_by_field(&self) -> &IndexMap<String, Vec<String>> {
        &self.warnings
    }
}

fn has_messages(map: &IndexMap<String, Vec<String>>, field: Option<&str>) -> bool {
    match field {
        Some(field) => map.get(field).is_some_and(|messages| !messages.is_empty()),
        None => map.values().any(|messages| !messages.is_empty()),
    }
}

fn messages<'a>(map: &'a IndexMap<String, Vec<String>>, field: Option<&str>) -> Vec<&'a str> {
    match field {
        Some(field) => map
            .get(field)
            .map(|messages| messages.iter().map(String::as_str).collect())
            .unwrap_or_default(),
        None => map.values().flatten().map(String::as_str).collect(),
    }
}
