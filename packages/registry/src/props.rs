//! # Property Values
//!
//! Component properties are a map of named fields to a small set of value
//! kinds. The kind a given field must hold is prescribed by the registry
//! (see [`crate::FieldKind`]); this module only knows about values.
//!
//! Props are plain owned data. Cloning a `Props` always yields storage that is
//! fully independent of the original, which is what the registry and the
//! history stack rely on.

use crate::schema::{FieldKind, RecordKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One entry of a structured list (a social platform, a feature column)
pub type Record = BTreeMap<String, RecordField>;

/// A value inside a [`Record`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordField {
    Flag(bool),
    Text(String),
}

impl RecordField {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RecordField::Text(text) => Some(text),
            RecordField::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            RecordField::Flag(flag) => Some(*flag),
            RecordField::Text(_) => None,
        }
    }
}

/// A single property value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
    Table(Vec<Vec<String>>),
    Records(Vec<Record>),
    /// Untyped JSON kept verbatim (fields of component types this build
    /// does not know)
    Json(Value),
}

impl PropValue {
    /// Convert persisted JSON into the kind a field requires.
    ///
    /// Returns `None` when the JSON does not have the expected shape.
    pub fn from_json(kind: &FieldKind, value: &Value) -> Option<PropValue> {
        match kind {
            FieldKind::Text | FieldKind::Color | FieldKind::Choice(_) => value
                .as_str()
                .filter(|s| kind.accepts_text(s))
                .map(|s| PropValue::Text(s.to_string())),
            FieldKind::Int { min, max } => value
                .as_i64()
                .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .map(|n| PropValue::Int(n.clamp(*min, *max))),
            FieldKind::Float { min, max } => value
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|f| PropValue::Float(f.clamp(*min, *max))),
            FieldKind::Lines | FieldKind::Tokens => {
                serde_json::from_value(value.clone()).ok().map(PropValue::List)
            }
            FieldKind::Table => serde_json::from_value(value.clone()).ok().map(PropValue::Table),
            FieldKind::Records(keys) => serde_json::from_value::<Vec<Record>>(value.clone())
                .ok()
                .filter(|records| records.iter().all(|record| record_matches(record, keys)))
                .map(PropValue::Records),
        }
    }

    /// Conversion for fields with no known schema. Anything without a typed
    /// counterpart is kept as raw JSON, so it serializes back unchanged.
    pub fn from_json_any(value: &Value) -> PropValue {
        let typed = match value {
            Value::Bool(b) => Some(PropValue::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(PropValue::Int)
                .or_else(|| n.is_f64().then(|| n.as_f64().map(PropValue::Float)).flatten()),
            Value::String(s) => Some(PropValue::Text(s.clone())),
            Value::Array(_) => serde_json::from_value(value.clone())
                .map(PropValue::List)
                .or_else(|_| serde_json::from_value(value.clone()).map(PropValue::Table))
                .or_else(|_| serde_json::from_value(value.clone()).map(PropValue::Records))
                .ok()
                .filter(|typed| serde_json::to_value(typed).ok().as_ref() == Some(value)),
            Value::Null | Value::Object(_) => None,
        };
        typed.unwrap_or_else(|| PropValue::Json(value.clone()))
    }

    /// Whether this value is of the kind the field prescribes
    pub fn fits(&self, kind: &FieldKind) -> bool {
        match (kind, self) {
            (FieldKind::Text | FieldKind::Color | FieldKind::Choice(_), PropValue::Text(text)) => {
                kind.accepts_text(text)
            }
            (FieldKind::Int { .. }, PropValue::Int(_)) => true,
            (FieldKind::Float { .. }, PropValue::Float(_)) => true,
            (FieldKind::Lines | FieldKind::Tokens, PropValue::List(_)) => true,
            (FieldKind::Table, PropValue::Table(_)) => true,
            (FieldKind::Records(keys), PropValue::Records(records)) => {
                records.iter().all(|record| record_matches(record, keys))
            }
            _ => false,
        }
    }
}

/// A record matches when it carries exactly the schema keys with the right
/// value kinds.
pub(crate) fn record_matches(record: &Record, keys: &[RecordKey]) -> bool {
    record.len() == keys.len()
        && keys.iter().all(|key| match record.get(key.name) {
            Some(RecordField::Flag(_)) => key.flag,
            Some(RecordField::Text(_)) => !key.flag,
            None => false,
        })
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<Vec<String>> for PropValue {
    fn from(value: Vec<String>) -> Self {
        PropValue::List(value)
    }
}

impl From<Vec<Vec<String>>> for PropValue {
    fn from(value: Vec<Vec<String>>) -> Self {
        PropValue::Table(value)
    }
}

impl From<Vec<Record>> for PropValue {
    fn from(value: Vec<Record>) -> Self {
        PropValue::Records(value)
    }
}

/// Named property fields of one component instance
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&PropValue> {
        self.0.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut PropValue> {
        self.0.get_mut(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Insert or replace a field. Returns the previous value, if any.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<PropValue>) -> Option<PropValue> {
        self.0.insert(field.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    // Typed readers used by the renderers. A missing field or a field of a
    // different kind reads as the empty value of the requested kind.

    pub fn text(&self, field: &str) -> &str {
        match self.0.get(field) {
            Some(PropValue::Text(text)) => text,
            _ => "",
        }
    }

    pub fn int(&self, field: &str) -> i64 {
        match self.0.get(field) {
            Some(PropValue::Int(n)) => *n,
            _ => 0,
        }
    }

    pub fn float(&self, field: &str) -> f64 {
        match self.0.get(field) {
            Some(PropValue::Float(f)) if f.is_finite() => *f,
            _ => 0.0,
        }
    }

    pub fn list(&self, field: &str) -> &[String] {
        match self.0.get(field) {
            Some(PropValue::List(items)) => items,
            _ => &[],
        }
    }

    pub fn table(&self, field: &str) -> &[Vec<String>] {
        match self.0.get(field) {
            Some(PropValue::Table(rows)) => rows,
            _ => &[],
        }
    }

    pub fn records(&self, field: &str) -> &[Record] {
        match self.0.get(field) {
            Some(PropValue::Records(records)) => records,
            _ => &[],
        }
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Props(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Build a [`Record`] from `(key, field)` pairs
pub fn record<'a>(fields: impl IntoIterator<Item = (&'a str, RecordField)>) -> Record {
    fields
        .into_iter()
        .map(|(key, field)| (key.to_string(), field))
        .collect()
}
