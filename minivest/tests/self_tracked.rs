//! Tests for self-tracked touched state.

mod common;

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Barrier};
use std::thread;

use minivest::prelude::*;
use serde::{Deserialize, Serialize};

use common::{Counting, calls, dev_config, email_form, email_suite};

#[test]
fn test_errors_hidden_until_touched() {
    let form = Signal::new(email_form("", ""));
    let minivest = Minivest::new(form, email_suite);

    let result = minivest.read();
    assert!(result.has_errors(None));
    assert!(!result.is_valid());
    assert!(!result.show_errors(None));

    let shown = result.show_errors_map().unwrap();
    assert_eq!(shown.keys().collect::<Vec<_>>(), vec!["email", "verifyEmail"]);
    assert!(shown.values().all(|show| !show));

    result.set_touched("email").unwrap();

    let result = minivest.read();
    assert!(result.show_errors(Some("email")));
    assert!(!result.show_errors(Some("verifyEmail")));
    assert!(result.show_errors(None));
    assert!(result.touched_fields().unwrap().contains("email"));
}

#[test]
fn test_touched_field_without_errors_hidden() {
    let form = Signal::new(email_form("ada@example.org", ""));
    let minivest = Minivest::new(form, email_suite);

    minivest.read().set_touched("email").unwrap();
    let result = minivest.read();
    assert!(!result.has_errors(Some("email")));
    assert!(!result.show_errors(Some("email")));
}

#[test]
fn test_set_touched_is_idempotent() {
    let (suite, counter) = Counting::new(email_suite);
    let minivest = Minivest::new(Signal::new(email_form("", "")), suite);

    minivest.read().set_touched("email").unwrap();
    let first = minivest.read();
    let runs = calls(&counter);

    first.set_touched("email").unwrap();
    let second = minivest.read();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls(&counter), runs);
    assert_eq!(first.touched_fields(), second.touched_fields());
}

#[test]
fn test_set_touched_rejects_empty_path() {
    let minivest = Minivest::new(Signal::new(email_form("", "")), email_suite);
    assert_eq!(minivest.read().set_touched(""), Err(PathError::Empty));
    assert!(minivest.read().touched_fields().unwrap().is_empty());
}

#[test]
fn test_set_all_touched_shows_every_error() {
    let minivest = Minivest::new(Signal::new(email_form("", "")), email_suite);

    minivest.read().set_all_touched();

    let result = minivest.read();
    assert!(result.show_errors(Some("email")));
    assert!(result.show_errors(Some("verifyEmail")));
    assert_eq!(result.touched_fields().unwrap().len(), 2);
}

#[test]
fn test_show_errors_covers_only_present_paths() {
    let form = Signal::new(Value::from(Record::new().set("email", "")));
    let minivest = Minivest::new(form, email_suite);

    minivest.read().set_all_touched();
    let result = minivest.read();
    assert!(result.has_errors(Some("verifyEmail")));
    assert!(!result.show_errors(Some("verifyEmail")));
}

#[test]
fn test_submit_invalid_form() {
    let minivest = Minivest::new(Signal::new(email_form("", "")), email_suite);
    let mut event = FormSubmit::new();

    let valid = minivest.read().submit(&mut event);

    assert!(!valid);
    assert_eq!(event.prevent_count(), 1);
    let result = minivest.read();
    assert!(result.show_errors(Some("email")));
    assert!(result.show_errors(Some("verifyEmail")));
}

#[test]
fn test_submit_valid_form() {
    let form = Signal::new(email_form("ada@example.org", "ada@example.org"));
    let minivest = Minivest::new(form, email_suite);
    let mut event = FormSubmit::new();

    assert!(minivest.read().submit(&mut event));
    assert!(event.default_prevented());
    assert!(!minivest.read().show_errors(None));
}

#[test]
fn test_submit_validates_value_at_call_time() {
    let form = Signal::new(email_form("", ""));
    let minivest = Minivest::new(form.clone(), email_suite);
    let stale = minivest.read();

    form.set(email_form("ada@example.org", "ada@example.org"));

    let mut event = FormSubmit::new();
    assert!(stale.submit(&mut event));
    assert!(!stale.is_valid());
    assert_eq!(event.prevent_count(), 1);
}

#[test]
fn test_set_value_nested_path() {
    let form = Signal::new(common::nested_form());
    let minivest = Minivest::new(form.clone(), common::nested_suite);
    let before = form.get();

    minivest
        .read()
        .set_value("addressInfo.city", "Metropolis")
        .unwrap();

    let after = form.get();
    assert_eq!(
        get_at_path(&after, "addressInfo.city"),
        Some(&Value::from("Metropolis"))
    );
    assert_eq!(get_at_path(&before, "addressInfo.city"), Some(&Value::from("")));

    let result = minivest.read();
    assert!(!result.has_errors(Some("addressInfo.city")));
    assert!(result.has_errors(Some("addressInfo.street")));
    assert_eq!(result.value(), &after);
}

#[test]
fn test_set_value_new_path_is_listed() {
    let form = Signal::new(email_form("", ""));
    let minivest = Minivest::new(form, email_suite);

    minivest.read().set_value("profile.nickname", "ada").unwrap();

    let result = minivest.read();
    let shown = result.show_errors_map().unwrap();
    assert!(shown.contains_key("profile"));
    assert!(shown.contains_key("profile.nickname"));
}

#[test]
fn test_set_value_rejects_empty_path() {
    let form = Signal::new(email_form("", ""));
    let minivest = Minivest::new(form.clone(), email_suite);

    assert_eq!(
        minivest.read().set_value("", "x"),
        Err(PathError::Empty)
    );
    assert_eq!(form.version(), 0);
}

#[test]
fn test_concurrent_set_value_keeps_every_write() {
    const WRITERS: usize = 8;

    for _ in 0..50 {
        let form = Signal::new(Value::from(Record::new()));
        let minivest = Minivest::new(form.clone(), |_: &Value, _: Option<&str>| {
            SuiteResult::new()
        });
        let result = minivest.read();
        let barrier = Barrier::new(WRITERS);

        thread::scope(|scope| {
            for i in 0..WRITERS {
                let (result, barrier) = (&result, &barrier);
                scope.spawn(move || {
                    barrier.wait();
                    result.set_value(&format!("field{i}"), "x").unwrap();
                });
            }
        });

        let value = form.get();
        let record = value.as_record().unwrap();
        assert_eq!(record.len(), WRITERS);
        assert!((0..WRITERS).all(|i| record.contains_key(&format!("field{i}"))));
        assert_eq!(form.version(), WRITERS as u64);
    }
}

#[test]
fn test_set_value_on_read_only_form_is_noop() {
    let form = Signal::new(email_form("", ""));
    let minivest = Minivest::new(form.read_only(), email_suite).with_config(dev_config());

    let result = minivest.read();
    assert!(result.set_value("email", "ada@example.org").is_ok());
    assert!(result.set_value("email", "again@example.org").is_ok());

    assert_eq!(form.version(), 0);
    assert_eq!(form.get(), email_form("", ""));
    assert_eq!(minivest.read().value(), &email_form("", ""));
    assert!(minivest.has_warned(Misuse::ReadOnlySetValue));
}

#[test]
fn test_read_only_form_still_tracks_writes_from_owner() {
    let form = Signal::new(email_form("", ""));
    let minivest = Minivest::new(form.read_only(), email_suite);

    form.set(email_form("ada@example.org", "ada@example.org"));
    assert!(minivest.read().is_valid());
}

#[test]
fn test_read_only_warning_silent_outside_dev_mode() {
    let form = Signal::new(email_form("", ""));
    let minivest = Minivest::new(form.read_only(), email_suite)
        .with_config(MinivestConfig::new().dev_mode(false));

    minivest.read().set_value("email", "x").unwrap();
    assert!(!minivest.has_warned(Misuse::ReadOnlySetValue));
}

#[test]
fn test_reads_are_memoized() {
    let (suite, counter) = Counting::new(email_suite);
    let form = Signal::new(email_form("", ""));
    let minivest = Minivest::new(form.clone(), suite);

    let first = minivest.read();
    let second = minivest.read();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls(&counter), 1);

    first.set_value("email", "ada@example.org").unwrap();
    let third = minivest.read();
    assert!(!Arc::ptr_eq(&second, &third));
    assert_eq!(calls(&counter), 2);

    third.set_touched("email").unwrap();
    minivest.read();
    minivest.read();
    assert_eq!(calls(&counter), 3);
}

#[test]
fn test_suite_field_filter_is_optional() {
    let model = email_form("", "nope");
    let full = email_suite(&model, None);
    let only_verify = email_suite(&model, Some("verifyEmail"));

    assert_eq!(
        full.get_errors(Some("verifyEmail")),
        only_verify.get_errors(Some("verifyEmail"))
    );
    assert!(!only_verify.has_errors(Some("email")));
}

#[test]
fn test_warnings_do_not_invalidate() {
    let form = Signal::new(email_form("ada@example.com", "ada@example.com"));
    let minivest = Minivest::new(form, email_suite);

    let result = minivest.read();
    assert!(result.is_valid());
    assert_eq!(result.warn_count(), 1);
    assert_eq!(
        result.get_warnings(Some("email")),
        vec!["Free mail providers are discouraged"]
    );
}

#[test]
fn test_error_queries() {
    let minivest = Minivest::new(Signal::new(email_form("", "x")), email_suite);
    let result = minivest.read();

    assert_eq!(result.error_count(), 3);
    assert_eq!(
        result.get_errors(Some("email")),
        vec!["Email is required", "Email must be a valid email address"]
    );
    assert_eq!(result.get_errors(None).len(), 3);
    assert_eq!(
        result.get_errors(Some("verifyEmail")),
        vec!["Email addresses must match"]
    );
    assert!(result.get_errors(Some("missing")).is_empty());
}

#[test]
fn test_suite_panic_propagates() {
    let suite = |model: &Value, _field: Option<&str>| {
        if common::text(model, "email") == "boom" {
            panic!("suite failure");
        }
        SuiteResult::new()
    };
    let form = Signal::new(email_form("boom", ""));
    let minivest = Minivest::new(form.clone(), suite);

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| minivest.read()));
    assert!(outcome.is_err());

    form.set(email_form("fine", ""));
    assert!(minivest.read().is_valid());
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignupForm {
    email: Option<String>,
    verify_email: Option<String>,
}

#[test]
fn test_typed_model_round_trip() {
    let initial = SignupForm {
        email: Some(String::new()),
        verify_email: Some(String::new()),
    };
    let form = Signal::new(Value::from_model(&initial).unwrap());
    let minivest = Minivest::new(form, email_suite);

    assert_eq!(
        minivest.read().show_errors_map().unwrap().keys().collect::<Vec<_>>(),
        vec!["email", "verifyEmail"]
    );

    minivest.read().set_value("email", "ada@example.org").unwrap();
    let model: SignupForm = minivest.read().model().unwrap();
    assert_eq!(model.email.as_deref(), Some("ada@example.org"));
    assert_eq!(model.verify_email.as_deref(), Some(""));
}
