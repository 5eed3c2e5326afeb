//! Call arguments and their form encoding.
//!
//! Slack's Web API takes form-encoded fields. Scalars are sent as-is while
//! lists, maps and attachments travel as JSON text inside a single field.
//! Null values are never transmitted.

use crate::types::{Attachment, ChannelId, UserId};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Scalar argument value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean, sent as `true`/`false`
    Bool(bool),
    /// Integer
    Integer(i64),
    /// Unsigned integer beyond the signed range
    Unsigned(u64),
    /// Floating point number
    Float(f64),
    /// String
    String(String),
}

impl Scalar {
    /// Form field representation
    pub fn to_form_value(&self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Integer(i) => i.to_string(),
            Scalar::Unsigned(u) => u.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::String(s) => s.clone(),
        }
    }

    /// JSON representation, used when nested inside a structured value
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Integer(i) => Value::Number((*i).into()),
            Scalar::Unsigned(u) => Value::Number((*u).into()),
            Scalar::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Scalar::String(s) => Value::String(s.clone()),
        }
    }
}

/// A single argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Absent value; the key is dropped from the request
    Null,
    /// Scalar value
    Scalar(Scalar),
    /// Ordered list, sent as a JSON array
    Sequence(Vec<ArgValue>),
    /// Keyed mapping in insertion order, sent as a JSON object
    Mapping(Vec<(String, ArgValue)>),
    /// Message attachment, sent as its canonical JSON object
    Attachment(Box<Attachment>),
}

impl ArgValue {
    /// Whether this value is absent
    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }

    /// JSON representation of the value
    pub fn to_json(&self) -> Value {
        match self {
            ArgValue::Null => Value::Null,
            ArgValue::Scalar(scalar) => scalar.to_json(),
            ArgValue::Sequence(items) => Value::Array(items.iter().map(ArgValue::to_json).collect()),
            ArgValue::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<_, _>>(),
            ),
            ArgValue::Attachment(attachment) => attachment.to_value(),
        }
    }

    /// Form field value, or `None` when the key must not be sent
    pub fn encode(&self) -> Option<String> {
        match self {
            ArgValue::Null => None,
            ArgValue::Scalar(scalar) => Some(scalar.to_form_value()),
            structured => Some(structured.to_json().to_string()),
        }
    }
}

impl From<Scalar> for ArgValue {
    fn from(value: Scalar) -> Self {
        ArgValue::Scalar(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Scalar(Scalar::Bool(value))
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Scalar(Scalar::Integer(value.into()))
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Scalar(Scalar::Integer(value))
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        ArgValue::Scalar(Scalar::Integer(value.into()))
    }
}

impl From<u64> for ArgValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(signed) => ArgValue::Scalar(Scalar::Integer(signed)),
            Err(_) => ArgValue::Scalar(Scalar::Unsigned(value)),
        }
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Scalar(Scalar::Float(value))
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Scalar(Scalar::String(value))
    }
}

impl From<&String> for ArgValue {
    fn from(value: &String) -> Self {
        ArgValue::Scalar(Scalar::String(value.clone()))
    }
}

impl From<&ChannelId> for ArgValue {
    fn from(value: &ChannelId) -> Self {
        value.as_str().into()
    }
}

impl From<&UserId> for ArgValue {
    fn from(value: &UserId) -> Self {
        value.as_str().into()
    }
}

impl From<Attachment> for ArgValue {
    fn from(value: Attachment) -> Self {
        ArgValue::Attachment(Box::new(value))
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ArgValue::Null, Into::into)
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(value: Vec<T>) -> Self {
        ArgValue::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ArgValue>> From<BTreeMap<String, T>> for ArgValue {
    fn from(value: BTreeMap<String, T>) -> Self {
        ArgValue::Mapping(value.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<Arguments> for ArgValue {
    fn from(value: Arguments) -> Self {
        ArgValue::Mapping(value.0.into_iter().collect())
    }
}

impl From<Value> for ArgValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ArgValue::Null,
            Value::Bool(b) => b.into(),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => i.into(),
                (None, Some(u)) => u.into(),
                (None, None) => n.as_f64().map_or(ArgValue::Null, Into::into),
            },
            Value::String(s) => s.into(),
            Value::Array(items) => ArgValue::Sequence(items.into_iter().map(Into::into).collect()),
            Value::Object(entries) => {
                ArgValue::Mapping(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Named arguments for a single API call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(BTreeMap<String, ArgValue>);

impl Arguments {
    /// Create an empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument, replacing any previous value for the key
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an argument, returning the previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Option<ArgValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Get an argument
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.0.get(key)
    }

    /// Check whether a key is present (a present `Null` counts)
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove an argument
    pub fn remove(&mut self, key: &str) -> Option<ArgValue> {
        self.0.remove(key)
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no arguments
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the arguments in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ArgValue)> {
        self.0.iter()
    }

    /// Merge two argument sets into a new one. Keys in `overlay` win.
    pub fn merged(base: &Arguments, overlay: &Arguments) -> Arguments {
        let mut merged = base.clone();
        merged
            .0
            .extend(overlay.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    /// Encode as form fields, dropping null values
    pub fn to_form_fields(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter_map(|(key, value)| value.encode().map(|encoded| (key.clone(), encoded)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<ArgValue>> FromIterator<(K, V)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<ArgValue>> Extend<(K, V)> for Arguments {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for Arguments {
    type Item = (String, ArgValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ArgValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
