//! Nested Form Example
//!
//! Personal info, address and preferences in one nested model, run twice:
//! once with self-tracked touched state and once delegating to a control
//! group the way a UI toolkit with its own form controls would.

use log::LevelFilter;
use minivest::prelude::*;
use regex::Regex;
use simplelog::{Config, SimpleLogger};

const REQUIRED: [&str; 5] = [
    "personalInfo.firstName",
    "personalInfo.lastName",
    "addressInfo.street",
    "addressInfo.city",
    "addressInfo.zipCode",
];

fn text<'a>(model: &'a Value, path: &str) -> &'a str {
    get_at_path(model, path)
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn nested_form() -> Value {
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

fn nested_suite() -> impl Suite {
    let zip = Regex::new(r"^\d{4,5}$").ok();

    move |model: &Value, field: Option<&str>| {
        let mut checks = Checks::new(field);
        for path in REQUIRED {
            checks.test(path, "This field is required", || {
                !text(model, path).trim().is_empty()
            });
        }

        let zip_code = text(model, "addressInfo.zipCode");
        checks.test("addressInfo.zipCode", "Zip code must be 4 or 5 digits", || {
            zip_code.is_empty() || zip.as_ref().is_some_and(|re| re.is_match(zip_code))
        });

        let newsletter = get_at_path(model, "preferences.newsletter")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        checks.test(
            "personalInfo.email",
            "Email is required for the newsletter",
            || !newsletter || !text(model, "personalInfo.email").is_empty(),
        );
        checks.finish()
    }
}

fn self_tracked() -> Result<(), PathError> {
    log::info!("== Self-tracked touched state ==");
    let form = Signal::new(nested_form());
    let minivest = Minivest::new(form.clone(), nested_suite());

    let result = minivest.read();
    result.set_value("personalInfo.firstName", "Ada")?;
    result.set_touched("personalInfo.firstName")?;
    result.set_value("addressInfo.zipCode", "12ab")?;
    result.set_touched("addressInfo.zipCode")?;
    result.set_value("preferences.newsletter", true)?;

    let result = minivest.read();
    if let Some(shown) = result.show_errors_map() {
        for (path, show) in shown.iter().filter(|(_, show)| **show) {
            log::info!("{} -> {:?} ({})", path, result.get_errors(Some(path.as_str())), show);
        }
    }
    log::info!("{} errors, valid: {}", result.error_count(), result.is_valid());
    Ok(())
}

fn delegated() -> Result<(), PathError> {
    log::info!("== Delegated to a control group ==");
    let handle = ControlTreeHandle::new();
    let form = Signal::new(nested_form());
    let minivest = Minivest::with_controls(form.clone(), nested_suite(), handle.clone());

    // Controls appear once the view is built.
    let controls = ControlGroup::new();
    for path in REQUIRED {
        controls.register(path);
    }
    handle.mount(controls.clone());

    minivest.read().set_value("addressInfo.street", "Main St")?;
    minivest.read();

    // Submitting: the caller marks every control before reading results.
    controls.mark_all_as_touched();
    controls.mark_all_as_dirty();

    let result = minivest.read();
    for path in REQUIRED {
        let control = controls.get(path);
        log::info!(
            "{:<24} show: {:<5} slot: {:?}",
            path,
            result.show_errors(Some(path)),
            control.and_then(|c| c.errors())
        );
    }
    log::info!("valid: {}", result.is_valid());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Info, Config::default())?;
    self_tracked()?;
    delegated()?;
    Ok(())
}
