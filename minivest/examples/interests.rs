//! Interests Example
//!
//! A dynamic list stored as an index-keyed object, so every entry has its
//! own path (`interests.0`, `interests.1`, ...). New entries are validated
//! with a field-filtered suite run before they are added.

use log::LevelFilter;
use minivest::prelude::*;
use simplelog::{Config, SimpleLogger};

fn interests_suite(model: &Value, field: Option<&str>) -> SuiteResult {
    let mut checks = Checks::new(field);

    let candidate = get_at_path(model, "addInterest")
        .and_then(Value::as_str)
        .unwrap_or_default();
    // Only checked when explicitly validating the add field.
    if field == Some("addInterest") {
        checks.test("addInterest", "Interest cannot be empty when adding", || {
            !candidate.trim().is_empty()
        });
    }

    if let Some(interests) = get_at_path(model, "interests").and_then(Value::as_record) {
        for (key, interest) in interests.iter() {
            let path = format!("interests.{key}");
            let interest = interest.as_str().unwrap_or_default();
            checks
                .test(&path, "Interest cannot be empty", || !interest.is_empty())
                .test(&path, "Interest must be at least 2 characters", || {
                    interest.chars().count() > 1
                });
        }
    }

    checks.finish()
}

fn current_interests(form: &Signal<Value>) -> Vec<Value> {
    form.with(|value| {
        get_at_path(value, "interests")
            .and_then(Value::as_record)
            .map(|interests| interests.values().cloned().collect())
            .unwrap_or_default()
    })
}

fn add_interest(minivest: &Minivest, form: &Signal<Value>) -> Result<(), PathError> {
    let current = form.get();
    let check = interests_suite(&current, Some("addInterest"));
    if check.has_errors(Some("addInterest")) {
        log::warn!(
            "Cannot add interest: {:?}",
            check.get_errors(Some("addInterest"))
        );
        return Ok(());
    }

    let candidate = get_at_path(&current, "addInterest")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();
    let mut interests = current_interests(form);
    interests.push(Value::from(candidate));

    let result = minivest.read();
    result.set_value("interests", Value::indexed(interests))?;
    result.set_value("addInterest", "")?;
    Ok(())
}

fn remove_interest(
    minivest: &Minivest,
    form: &Signal<Value>,
    index: usize,
) -> Result<(), PathError> {
    let remaining: Vec<Value> = current_interests(form)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, interest)| interest)
        .collect();
    minivest.read().set_value("interests", Value::indexed(remaining))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Info, Config::default())?;

    let form = Signal::new(Value::from(
        Record::new()
            .set("addInterest", "")
            .set("interests", Record::new()),
    ));
    let minivest = Minivest::new(form.clone(), interests_suite);

    add_interest(&minivest, &form)?;

    for candidate in ["rust", "x", "chess"] {
        minivest.read().set_value("addInterest", candidate)?;
        add_interest(&minivest, &form)?;
    }

    let result = minivest.read();
    log::info!("Paths: {:?}", list_all_paths(result.value()));
    result.set_touched("interests.1")?;

    let result = minivest.read();
    log::info!(
        "interests.1 show: {} errors: {:?}",
        result.show_errors(Some("interests.1")),
        result.get_errors(Some("interests.1"))
    );

    remove_interest(&minivest, &form, 1)?;
    let mut event = FormSubmit::new();
    let valid = minivest.read().submit(&mut event);
    log::info!("Submit valid: {}", valid);

    let submitted: Vec<Value> = current_interests(&form);
    log::info!(
        "Submitting {}",
        serde_json::to_string(&Value::from(submitted))?
    );
    Ok(())
}
