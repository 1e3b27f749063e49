//! Development-mode misuse warnings.

use std::sync::atomic::{AtomicBool, Ordering};

/// Ways of calling the adapter that have no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Misuse {
    /// `set_value` on an instance backed by a read-only form signal.
    ReadOnlySetValue,
    /// `set_touched` on an instance whose touched state lives in an
    /// external control tree.
    DelegatedSetTouched,
}

impl Misuse {
    pub fn message(self) -> &'static str {
        match self {
            Misuse::ReadOnlySetValue => {
                "Cannot set_value on a read-only form signal. Pass a writable Signal to enable set_value."
            }
            Misuse::DelegatedSetTouched => {
                "Cannot set_touched when touched state is delegated to a control tree. Mark the controls instead."
            }
        }
    }
}

/// Tracks which misuse warnings an instance has already emitted.
#[derive(Debug, Default)]
pub(crate) struct DevWarnings {
    read_only_set_value: AtomicBool,
    delegated_set_touched: AtomicBool,
}

impl DevWarnings {
    /// Log `misuse` unless it was logged before. Returns `true` if logged.
    pub(crate) fn warn_once(&self, misuse: Misuse, dev_mode: bool) -> bool {
        if !dev_mode || self.flag(misuse).swap(true, Ordering::SeqCst) {
            return false;
        }
        log::warn!("{}", misuse.message());
        true
    }

    pub(crate) fn has_warned(&self, misuse: Misuse) -> bool {
        self.flag(misuse).load(Ordering::SeqCst)
    }

    fn flag(&self, misuse: Misuse) -> &AtomicBool {
        match misuse {
            Misuse::ReadOnlySetValue => &self.read_only_set_value,
            Misuse::DelegatedSetTouched => &self.delegated_set_touched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warns_once_per_kind() {
        let warnings = DevWarnings::default();
        assert!(warnings.warn_once(Misuse::ReadOnlySetValue, true));
        assert!(!warnings.warn_once(Misuse::ReadOnlySetValue, true));
        assert!(warnings.warn_once(Misuse::DelegatedSetTouched, true));
    }

    #[test]
    fn test_silent_outside_dev_mode() {
        let warnings = DevWarnings::default();
        assert!(!warnings.warn_once(Misuse::ReadOnlySetValue, false));
        assert!(!warnings.has_warned(Misuse::ReadOnlySetValue));
    }
}
