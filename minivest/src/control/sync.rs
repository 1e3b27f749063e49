use super::{ControlErrors, ControlTree};
use crate::suite::SuiteResult;

/// Push validation errors onto every registered control.
///
/// A field with errors gets a single entry `{error_key: first message}`.
/// A field without errors has its error slot cleared, which also drops
/// errors placed there by anything else.
pub fn sync_errors(tree: &dyn ControlTree, result: &SuiteResult, error_key: &str) {
    for path in tree.paths() {
        let Some(control) = tree.control(&path) else {
            continue;
        };

        match result.first_error(&path) {
            Some(message) => {
                log::trace!("Syncing error to control '{}': {}", path, message);
                control.set_errors(Some(ControlErrors::from([(
                    error_key.to_string(),
                    message.to_string(),
                )])));
            }
            None => control.set_errors(None),
        }
    }
}
