//! Value types for records

use crate::path::FieldPath;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use indexmap::map;

/// A string-keyed record of values
///
/// Fields keep insertion order. Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

/// Values that can be stored in a record
///
/// Arrays are not representable; deserializing one fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit null
    Null,

    /// Boolean value
    Boolean(bool),

    /// Integer value
    Integer(i64),

    /// Integer above `i64::MAX`
    Unsigned(u64),

    /// Decimal value
    Decimal(f64),

    /// String value
    String(String),

    /// Nested record
    Record(Record),
}

/// Outcome of resolving a dotted path against a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    /// The path ends at a non-record value
    Scalar(&'a Value),

    /// The path ends at a nested record
    Record(&'a Record),

    /// Some segment along the path is absent, or an intermediate value is
    /// not a record
    Missing,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a record from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not valid JSON, is not an object,
    /// or contains arrays.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Convert a JSON value into a record
    ///
    /// # Errors
    ///
    /// Returns an error when the value is not an object or contains arrays.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(Error::not_a_record(json_kind(&other))),
        }
    }

    /// Convert the record into a JSON value
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json_value()))
                .collect(),
        )
    }

    /// Insert a field, returning the previous value if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Get a direct field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Check whether a direct field exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of direct fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over direct fields in insertion order
    pub fn iter(&self) -> map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    /// Direct field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Resolve a dotted path against this record
    pub fn resolve(&self, path: &FieldPath) -> Resolved<'_> {
        resolve_segments(self, path.segments())
    }

    /// Dotted paths of every leaf, depth first in insertion order
    ///
    /// A leaf is any non-record value, or a nested record with no fields.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_leaf_paths(self, "", &mut paths);
        paths
    }
}

fn resolve_segments<'a>(record: &'a Record, segments: &[String]) -> Resolved<'a> {
    match segments {
        [] => Resolved::Record(record),
        [leaf] => match record.get(leaf) {
            Some(Value::Record(nested)) => Resolved::Record(nested),
            Some(value) => Resolved::Scalar(value),
            None => Resolved::Missing,
        },
        [head, rest @ ..] => match record.get(head) {
            Some(Value::Record(nested)) => resolve_segments(nested, rest),
            Some(_) | None => Resolved::Missing,
        },
    }
}

fn collect_leaf_paths(record: &Record, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in record.iter() {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Record(nested) if !nested.is_empty() => collect_leaf_paths(nested, &path, out),
            _ => out.push(path),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl Value {
    /// Short name of the value kind, for messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) | Value::Unsigned(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Record(_) => "record",
        }
    }

    /// Borrow the string contents if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the nested record if this is one
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert the value into a JSON value
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Unsigned(u) => serde_json::Value::from(*u),
            Value::Decimal(d) => serde_json::Value::from(*d),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Record(record) => record.to_json_value(),
        }
    }
}

impl Resolved<'_> {
    /// True when nothing was found at the path
    pub fn is_missing(&self) -> bool {
        matches!(self, Resolved::Missing)
    }

    /// Clone the resolved value out, if any
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Resolved::Scalar(value) => Some((*value).clone()),
            Resolved::Record(record) => Some(Value::Record((*record).clone())),
            Resolved::Missing => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Value::Unsigned(value), Value::Integer)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Decimal(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn company_user() -> Record {
        Record::from_json_value(json!({
            "id": 1,
            "name": "Ada",
            "company": {
                "name": "Acme",
                "address": { "street": "Main St" }
            },
            "nickname": null
        }))
        .unwrap()
    }

    #[test]
    fn test_resolve_flat_field() {
        let record = company_user();
        assert_eq!(
            record.resolve(&FieldPath::parse("name")),
            Resolved::Scalar(&Value::String("Ada".to_string()))
        );
    }

    #[test]
    fn test_resolve_nested_field() {
        let record = company_user();
        assert_eq!(
            record.resolve(&FieldPath::parse("company.address.street")),
            Resolved::Scalar(&Value::from("Main St"))
        );
    }

    #[test]
    fn test_resolve_to_nested_record() {
        let record = company_user();
        match record.resolve(&FieldPath::parse("company.address")) {
            Resolved::Record(address) => assert_eq!(address.len(), 1),
            other => panic!("Expected record, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_missing_intermediate() {
        let record = company_user();
        assert!(
            record
                .resolve(&FieldPath::parse("billing.address.street"))
                .is_missing()
        );
    }

    #[test]
    fn test_resolve_through_scalar_is_missing() {
        let record = company_user();
        assert!(record.resolve(&FieldPath::parse("name.first")).is_missing());
        assert!(
            record
                .resolve(&FieldPath::parse("nickname.value"))
                .is_missing()
        );
    }

    #[test]
    fn test_present_null_is_not_missing() {
        let record = company_user();
        assert_eq!(
            record.resolve(&FieldPath::parse("nickname")),
            Resolved::Scalar(&Value::Null)
        );
    }

    #[test]
    fn test_leaf_paths() {
        let record = company_user();
        assert_eq!(
            record.leaf_paths(),
            vec![
                "id",
                "name",
                "company.name",
                "company.address.street",
                "nickname"
            ]
        );
    }

    #[test]
    fn test_json_numbers_map_to_integer_and_decimal() {
        let record = Record::from_json_str(r#"{"count": 3, "ratio": 0.5, "ok": true}"#).unwrap();
        assert_eq!(record.get("count"), Some(&Value::Integer(3)));
        assert_eq!(record.get("ratio"), Some(&Value::Decimal(0.5)));
        assert_eq!(record.get("ok"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_json_round_trip_preserves_shape() {
        let source = json!({"id": 7, "company": {"name": "Acme"}, "gone": null});
        let record = Record::from_json_value(source.clone()).unwrap();
        assert_eq!(record.to_json_value(), source);
        assert_eq!(serde_json::to_value(&record).unwrap(), source);
    }

    #[test]
    fn test_integers_above_i64_keep_their_digits() {
        let source = json!({"id": 18_446_744_073_709_551_615_u64, "small": 5});
        let record = Record::from_json_value(source.clone()).unwrap();

        assert_eq!(record.get("id"), Some(&Value::Unsigned(u64::MAX)));
        assert_eq!(record.get("small"), Some(&Value::Integer(5)));
        assert_eq!(record.to_json_value(), source);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"id":18446744073709551615,"small":5}"#
        );
    }

    #[test]
    fn test_u64_conversion_prefers_integer() {
        assert_eq!(Value::from(7_u64), Value::Integer(7));
        assert_eq!(Value::from(u64::MAX), Value::Unsigned(u64::MAX));
    }

    #[test]
    fn test_fields_keep_input_order() {
        let record = Record::from_json_str(r#"{"zeta": 1, "alpha": 2, "mid": {"b": 1, "a": 2}}"#)
            .unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            serde_json::to_string(&record.to_json_value()).unwrap(),
            r#"{"zeta":1,"alpha":2,"mid":{"b":1,"a":2}}"#
        );
    }

    #[test]
    fn test_non_object_json_is_rejected() {
        let err = Record::from_json_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::NotARecord { found: "array" }));

        let err = Record::from_json_str("\"text\"").unwrap_err();
        assert!(matches!(err, Error::NotARecord { found: "string" }));
    }

    #[test]
    fn test_nested_arrays_are_rejected() {
        let err = Record::from_json_value(json!({"tags": ["a", "b"]})).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
