//! Signup Example
//!
//! Email + verify-email form driven headlessly:
//! - errors stay hidden until a field is touched
//! - set_value writes through the run result
//! - submit touches everything and reports validity

use log::LevelFilter;
use minivest::prelude::*;
use simplelog::{Config, SimpleLogger};

fn text<'a>(model: &'a Value, path: &str) -> &'a str {
    get_at_path(model, path)
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn signup_suite(model: &Value, field: Option<&str>) -> SuiteResult {
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
        .test("verifyEmail", "Email addresses must match", || email == verify);
    checks.finish()
}

fn report(minivest: &Minivest) {
    let result = minivest.read();
    for path in ["email", "verifyEmail"] {
        let shown = if result.show_errors(Some(path)) {
            result.get_errors(Some(path)).join("; ")
        } else {
            String::from("-")
        };
        log::info!("{:<12} {}", path, shown);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Debug, Config::default())?;

    let form = Signal::new(Value::from(
        Record::new().set("email", "").set("verifyEmail", ""),
    ));
    let minivest = Minivest::new(form.clone(), signup_suite);

    log::info!("Initial state (nothing touched)");
    report(&minivest);

    minivest.read().set_value("email", "ada@example")?;
    minivest.read().set_touched("email")?;
    log::info!("After typing an email and leaving the field");
    report(&minivest);

    let mut event = FormSubmit::new();
    if minivest.read().submit(&mut event) {
        log::info!("Form validation passed - ready to submit");
    } else {
        log::info!(
            "Form validation failed with {} errors",
            minivest.read().error_count()
        );
        report(&minivest);
    }

    minivest.read().set_value("email", "ada@example.org")?;
    minivest.read().set_value("verifyEmail", "ada@example.org")?;
    let mut event = FormSubmit::new();
    let valid = minivest.read().submit(&mut event);
    log::info!("Second submit valid: {}", valid);

    Ok(())
}
