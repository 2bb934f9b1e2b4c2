use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset};

pub mod date;

/// Separator used when a list is stringified without an explicit one
pub const DEFAULT_LIST_SEPARATOR: &str = ", ";

/// Pattern used when a date is stringified without an explicit one
pub const DEFAULT_DATE_FORMAT: &str = "MMMM Do YYYY, HH:mm";

/// A value produced by a resolver, a function or a literal in a template
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// Nothing was resolved
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Date(DateTime<FixedOffset>),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// `Null` or the empty string
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::Date(date) => Some(date),
            _ => None,
        }
    }

    /// Stringify the value
    ///
    /// Lists are formatted element by element and joined with `separator`,
    /// dates are formatted with the moment style `date_format` (see [date]).
    pub fn format(&self, separator: &str, date_format: &str) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Date(d) => date::format(d, date_format),
            Value::List(items) => items
                .iter()
                .map(|item| item.format(separator, date_format))
                .collect::<Vec<_>>()
                .join(separator),
            Value::Object(_) => serde_json::Value::from(self.clone()).to_string(),
        }
    }
}

/// Separator and date pattern used to stringify values
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Formatting<'a> {
    pub list_separator: &'a str,
    pub date_format: &'a str,
}

impl Default for Formatting<'_> {
    fn default() -> Self {
        Self {
            list_separator: DEFAULT_LIST_SEPARATOR,
            date_format: DEFAULT_DATE_FORMAT,
        }
    }
}

impl Formatting<'_> {
    pub fn format(&self, value: &Value) -> String {
        value.format(self.list_separator, self.date_format)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_LIST_SEPARATOR, DEFAULT_DATE_FORMAT))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::Date(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Integer(i) => serde_json::Value::from(i),
            Value::Float(f) => serde_json::Value::from(f),
            Value::String(s) => serde_json::Value::String(s),
            Value::Date(d) => serde_json::Value::String(d.to_rfc3339()),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}
