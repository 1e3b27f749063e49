//! Shared suites and form builders for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use minivest::prelude::*;

/// String at `path`, or `""` when absent.
pub fn text<'a>(model: &'a Value, path: &str) -> &'a str {
    get_at_path(model, path)
        .and_then(Value::as_str)
        .unwrap_or_default()
}

pub fn email_form(email: &str, verify: &str) -> Value {
    Value::from(
        Record::new()
            .set("email", email)
            .set("verifyEmail", verify),
    )
}

pub fn email_suite(model: &Value, field: Option<&str>) -> SuiteResult {
    let email = text(model, "email");
    let verify = text(model, "verifyEmail");

    let mut checks = Checks::new(field);
    checks
        .test("email", "Email is required", || !email.is_empty())
        .test("email", "Email must be a valid email address", || {
            email_address::EmailAddress::is_valid(email)
        })
        .test("verifyEmail", "Email verification is required", || {
            !verify.is_empty()
        })
        .test("verifyEmail", "Email addresses must match", || email == verify)
        .warn("email", "Free mail providers are discouraged", || {
            !email.ends_with("@example.com")
        });
    checks.finish()
}

pub fn nested_form() -> Value {
    Value::from(
        Record::new()
            .set(
                "personalInfo",
                Record::new()
                    .set("firstName", "")
                    .set("lastName", "")
                    .set("email", ""),
            )
            .set(
                "addressInfo",
                Record::new()
                    .set("street", "")
                    .set("city", "")
                    .set("zipCode", "")
                    .set("country", ""),
            )
            .set(
                "preferences",
                Record::new()
                    .set("newsletter", false)
                    .set("notifications", false),
            ),
    )
}

pub fn nested_suite(model: &Value, field: Option<&str>) -> SuiteResult {
    let mut checks = Checks::new(field);
    for path in [
        "personalInfo.firstName",
        "personalInfo.lastName",
        "addressInfo.street",
        "addressInfo.city",
    ] {
        checks.test(path, "This field is required", || !text(model, path).is_empty());
    }
    checks.finish()
}

/// Suite wrapper counting how often it runs.
pub struct Counting<S> {
    inner: S,
    calls: Arc<AtomicUsize>,
}

impl<S: Suite> Counting<S> {
    pub fn new(inner: S) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl<S: Suite> Suite for Counting<S> {
    fn run(&self, model: &Value, field: Option<&str>) -> SuiteResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.run(model, field)
    }
}

pub fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

/// Config with misuse warnings forced on regardless of build profile.
pub fn dev_config() -> MinivestConfig {
    MinivestConfig::new().dev_mode(true)
}
