//! Dot-separated path algebra over nested form values.
//!
//! Paths address fields inside a [`Value`] tree (`"addressInfo.street"`).
//! Writes are structural: [`set_at_path`] returns a new root that copies only
//! the branches along the written path and shares every other branch with
//! the input.

use crate::error::PathError;
use crate::value::{Record, Value};

/// Splits a path into its segments.
///
/// Fails for the empty path and for paths with an empty segment.
pub fn resolve_segments(path: &str) -> Result<Vec<&str>, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }

    let segments: Vec<&str> = path.split('.').collect();
    if let Some(index) = segments.iter().position(|segment| segment.is_empty()) {
        return Err(PathError::empty_segment(path, index));
    }

    Ok(segments)
}

/// Reads the value at `path`.
///
/// Objects are descended by key, arrays by numeric index. Returns `None` for
/// malformed paths and for paths that do not resolve.
pub fn get_at_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let segments = resolve_segments(path).ok()?;
    segments
        .into_iter()
        .try_fold(root, |current, segment| match current {
            Value::Object(record) => record.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Returns a copy of `root` with `value` written at `path`.
///
/// Intermediate branches that are absent, null, or scalars are replaced with
/// empty objects, discarding the previous value. Array branches become
/// objects keyed by element index. The root is coerced the same way: an
/// array root is spread into index keys and any other non-object root is
/// treated as an empty object. `root` itself is never modified.
///
/// ```
/// use minivest::path::{get_at_path, set_at_path};
/// use minivest::value::{Record, Value};
///
/// let form = Value::from(Record::new().set("addressInfo", Record::new().set("city", "")));
/// let next = set_at_path(&form, "addressInfo.city", Value::from("Metropolis")).unwrap();
///
/// assert_eq!(get_at_path(&next, "addressInfo.city"), Some(&Value::from("Metropolis")));
/// assert_eq!(get_at_path(&form, "addressInfo.city"), Some(&Value::from("")));
/// ```
pub fn set_at_path(root: &Value, path: &str, value: Value) -> Result<Value, PathError> {
    let segments = resolve_segments(path)?;
    Ok(Value::Object(write_branch(branch_record(root), &segments, value)))
}

/// Lists every field path of `value`, depth-first in key insertion order.
///
/// Nested objects are descended (including index-keyed objects such as
/// `{"0": .., "1": ..}`); arrays are leaves. A value that is not an object
/// has no paths.
pub fn list_all_paths(value: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    if let Value::Object(record) = value {
        collect_paths(record, None, &mut paths);
    }
    paths
}

fn collect_paths(record: &Record, prefix: Option<&str>, paths: &mut Vec<String>) {
    for (key, value) in record.iter() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.to_string(),
        };
        paths.push(path.clone());

        if let Value::Object(child) = value {
            collect_paths(child, Some(&path), paths);
        }
    }
}

/// Writes `value` under `segments`, copying `record` (and each descended
/// child) on write.
fn write_branch(mut record: Record, segments: &[&str], value: Value) -> Record {
    match segments {
        [] => {}
        [last] => record.insert(*last, value),
        [head, rest @ ..] => {
            let child = branch_record(record.get(head).unwrap_or(&Value::Null));
            let child = write_branch(child, rest, value);
            record.insert(*head, child);
        }
    }
    record
}

/// Coerces a branch to a record for descent.
fn branch_record(value: &Value) -> Record {
    match value {
        Value::Object(record) => record.clone(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item.clone()))
            .collect(),
        _ => Record::new(),
    }
}
