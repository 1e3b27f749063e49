//! Value enum for nested partial form models

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ModelError;

/// A dynamic value held by a form model.
///
/// Form models are partial, arbitrarily nested records. Object and array
/// branches are reference counted, so cloning a `Value` is cheap and keeps
/// branch identity: an untouched branch of a copied model is the *same*
/// allocation as in the original (see [`Record::ptr_eq`]).
///
/// # Example
///
/// ```
/// use minivest::value::{Record, Value};
///
/// let form = Value::from(
///     Record::new()
///         .set("email", "")
///         .set("addressInfo", Record::new().set("street", "").set("city", "")),
/// );
/// assert_eq!(form.type_name(), "object");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Array value. Path enumeration treats arrays as opaque leaves.
    Array(Arc<Vec<Value>>),
    /// Nested object.
    Object(Record),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Object(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Builds an object keyed by element index (`"0"`, `"1"`, ...).
    ///
    /// Dynamic list fields are modelled as index-keyed objects so that every
    /// entry gets its own addressable path (`"interests.0"`), whereas real
    /// arrays are opaque leaves.
    ///
    /// ```
    /// use minivest::value::Value;
    ///
    /// let interests = Value::indexed(["rust", "chess"]);
    /// let record = interests.as_record().unwrap();
    /// assert_eq!(record.get("1").and_then(|v| v.as_str()), Some("chess"));
    /// ```
    pub fn indexed<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Object(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    let item: Value = item.into();
                    (index.to_string(), item)
                })
                .collect(),
        )
    }

    /// Converts a typed model into a form value.
    ///
    /// The model must serialize to an object (a struct or map).
    pub fn from_model<T: Serialize>(model: &T) -> Result<Self, ModelError> {
        let value = Value::from(serde_json::to_value(model)?);
        if value.is_object() {
            Ok(value)
        } else {
            Err(ModelError::NotAnObject {
                actual: value.type_name(),
            })
        }
    }

    /// Converts this form value into a typed model.
    ///
    /// Partial forms should be read into models whose fields are optional
    /// or carry serde defaults.
    pub fn to_model<T: DeserializeOwned>(&self) -> Result<T, ModelError> {
        let json = serde_json::to_value(self)?;
        Ok(serde_json::from_value(json)?)
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Object(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(Arc::new(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(Arc::new(items.into_iter().map(Value::from).collect()))
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// An object branch of a form model.
///
/// Keys keep insertion order. The field map sits behind an `Arc`: cloning a
/// record shares it, and writing through [`Record::insert`] copies it only
/// when it is shared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Arc<IndexMap<String, Value>>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the record (builder style).
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a field in place, copying the shared field map first if needed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        Arc::make_mut(&mut self.fields).insert(key.into(), value.into());
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Field values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns `true` if both records share the same field map allocation.
    pub fn ptr_eq(a: &Record, b: &Record) -> bool {
        Arc::ptr_eq(&a.fields, &b.fields)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: Arc::new(
                iter.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_keeps_key_order() {
        let value = Value::from(serde_json::json!({"b": 1, "a": {"z": true, "y": null}}));
        let record = value.as_record().unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["b", "a"]);

        let nested = record.get("a").and_then(Value::as_record).unwrap();
        assert_eq!(nested.keys().collect::<Vec<_>>(), vec!["z", "y"]);
        assert!(nested.get("y").unwrap().is_null());
    }

    #[test]
    fn test_insert_copies_shared_fields() {
        let original = Record::new().set("name", "Ada");
        let mut copy = original.clone();
        assert!(Record::ptr_eq(&original, &copy));

        copy.insert("name", "Grace");
        assert!(!Record::ptr_eq(&original, &copy));
        assert_eq!(original.get("name").and_then(Value::as_str), Some("Ada"));
        assert_eq!(copy.get("name").and_then(Value::as_str), Some("Grace"));
    }

    #[test]
    fn test_serialize_untagged() {
        let value = Value::from(
            Record::new()
                .set("email", "a@b.co")
                .set("age", 42)
                .set("tags", vec![Value::from("x")]),
        );
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"email":"a@b.co","age":42,"tags":["x"]}"#);
    }

    #[test]
    fn test_indexed_builds_numeric_keys() {
        let value = Value::indexed(vec!["a", "b"]);
        let record = value.as_record().unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["0", "1"]);
        assert_eq!(
            record.values().filter_map(Value::as_str).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_scalar_accessors() {
        let value = Value::from(serde_json::json!({
            "age": 42,
            "ratio": 0.5,
            "tags": ["x", "y"]
        }));
        let record = value.as_record().unwrap();
        assert!(record.contains_key("age"));
        assert!(!record.contains_key("name"));

        assert_eq!(record.get("age").and_then(Value::as_i64), Some(42));
        assert_eq!(record.get("ratio").and_then(Value::as_f64), Some(0.5));
        assert_eq!(record.get("age").and_then(Value::as_f64), Some(42.0));
        assert_eq!(record.get("ratio").and_then(Value::as_i64), None);
        assert_eq!(
            record.get("tags").and_then(Value::as_array),
            Some(&[Value::from("x"), Value::from("y")][..])
        );
        assert_eq!(record.get("tags").and_then(Value::as_i64), None);
    }

    #[test]
    fn test_from_model_rejects_scalars() {
        let err = Value::from_model(&"just a string").unwrap_err();
        assert!(matches!(err, ModelError::NotAnObject { actual: "string" }));
    }
}
