//! Value representations for the entity-factory framework.
//!
//! `FieldValue` is what the generators produce and what callers pass as
//! overrides. `AttributeMap` is the flat name to value mapping a factory returns
//! and the transports consume.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Null value
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit float
    Float(f64),

    /// String value (also used for email, IP, MAC and URL kinds)
    String(String),

    /// Calendar date
    Date(NaiveDate),

    /// UTC timestamp
    DateTime(DateTime<Utc>),

    /// Unpersisted instance of another entity
    Entity(AttributeMap),

    /// List of values
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an f64. Integers convert too.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a nested entity.
    pub fn as_entity(&self) -> Option<&AttributeMap> {
        match self {
            Self::Entity(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Try to get this value as a list.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Convert an untyped YAML value.
    ///
    /// Dates stay strings here; kind-directed conversion happens in the catalog.
    pub fn from_yaml(yaml: &YamlValue) -> FieldValue {
        match yaml {
            YamlValue::Null => FieldValue::Null,
            YamlValue::Bool(b) => FieldValue::Bool(*b),
            YamlValue::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => FieldValue::Int(i),
                (None, Some(f)) => FieldValue::Float(f),
                (None, None) => FieldValue::String(n.to_string()),
            },
            YamlValue::String(s) => FieldValue::String(s.clone()),
            YamlValue::Sequence(items) => {
                FieldValue::List(items.iter().map(FieldValue::from_yaml).collect())
            }
            YamlValue::Mapping(map) => FieldValue::Entity(
                map.iter()
                    .map(|(k, v)| (yaml_key(k), FieldValue::from_yaml(v)))
                    .collect(),
            ),
            YamlValue::Tagged(tagged) => FieldValue::from_yaml(&tagged.value),
        }
    }

    /// Render as a JSON value for request bodies.
    ///
    /// Non-finite floats have no JSON form and render as `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Int(i) => JsonValue::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Date(d) => JsonValue::String(d.format("%Y-%m-%d").to_string()),
            Self::DateTime(dt) => {
                JsonValue::String(dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            Self::Entity(attrs) => attrs.to_json(),
            Self::List(items) => JsonValue::Array(items.iter().map(FieldValue::to_json).collect()),
        }
    }
}

/// Scalars print bare; entities and lists print as compact JSON.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::Entity(_) | Self::List(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        Self::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<AttributeMap> for FieldValue {
    fn from(attrs: AttributeMap) -> Self {
        Self::Entity(attrs)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        Self::List(items)
    }
}

/// Mapping keys are field names; scalar keys such as `1` or `true` keep their
/// YAML spelling.
fn yaml_key(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Flat mapping from (possibly remapped) field name to value.
///
/// Keys iterate in sorted order so seeded generation is reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap {
    values: BTreeMap<String, FieldValue>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for that key.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.values.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, FieldValue> {
        self.values
    }

    /// Render as a JSON object, the request body shape the REST API expects.
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Render as `--flag value` pairs for the command-line client.
    ///
    /// Every underscore in a name becomes a dash, names taken from a
    /// `cli_names` table included, so `field_names` is written as
    /// `--field-names`. Null values are skipped.
    pub fn to_cli_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.values.len() * 2);
        for (name, value) in &self.values {
            if value.is_null() {
                continue;
            }
            args.push(format!("--{}", name.replace('_', "-")));
            args.push(value.to_string());
        }
        args
    }
}

impl FromIterator<(String, FieldValue)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AttributeMap {
    type Item = (String, FieldValue);
    type IntoIter = btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
