//! Submission events.

/// An event whose default action can be suppressed.
///
/// Hosts wrap their native submit event in this trait; the adapter only
/// ever calls [`prevent_default`](SubmitEvent::prevent_default).
pub trait SubmitEvent {
    fn prevent_default(&mut self);
}

/// A plain submit event that records suppression.
#[derive(Debug, Clone, Default)]
pub struct FormSubmit {
    prevented: usize,
}

impl FormSubmit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the default action was suppressed.
    pub fn default_prevented(&self) -> bool {
        self.prevented > 0
    }

    /// How many times the default action was suppressed.
    pub fn prevent_count(&self) -> usize {
        self.prevented
    }
}

impl SubmitEvent for FormSubmit {
    fn prevent_default(&mut self) {
        self.prevented += 1;
    }
}
