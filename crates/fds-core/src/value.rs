#![forbid(unsafe_code)]

//! Value payloads carried by nodes and cells.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;

/// Primary display value of a node: a string or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
    Number(Number),
    Text(String),
}

impl NodeValue {
    /// Build a numeric value from a float. Returns `None` for NaN/infinite.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Self::Number)
    }

    /// The string payload, if this is a text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(_) => None,
        }
    }
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for NodeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for NodeValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for NodeValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for NodeValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

/// One entry of a chat cell's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Broad category of a [`CellValue`], used by shape specs to declare what
/// payload they expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Number,
    Bool,
    Chat,
    Structured,
    /// Accepts every payload.
    Any,
}

/// The value of a cell.
///
/// `Undefined` and `Null` are distinct: the first means the cell had no
/// `value` key at all, the second an explicit JSON `null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Chat(Vec<ChatMessage>),
    /// Arrays and objects without a more specific typed form.
    Structured(Value),
}

impl CellValue {
    /// Lift a JSON value into a cell value by its JSON type.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            other @ (Value::Array(_) | Value::Object(_)) => Self::Structured(other),
        }
    }

    /// Lift a JSON value, preferring the typed form `kind` calls for.
    ///
    /// Only chat histories have a typed form beyond the JSON primitives; an
    /// array that does not decode as messages stays structured.
    #[must_use]
    pub fn from_json_as(value: Value, kind: ValueKind) -> Self {
        if kind == ValueKind::Chat && value.is_array() {
            return match serde_json::from_value::<Vec<ChatMessage>>(value.clone()) {
                Ok(messages) => Self::Chat(messages),
                Err(_) => Self::Structured(value),
            };
        }
        Self::from_json(value)
    }

    /// Convert back into JSON. `Undefined` has no JSON form.
    #[must_use]
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::Undefined => None,
            Self::Null => Some(Value::Null),
            Self::Bool(b) => Some(Value::Bool(*b)),
            Self::Number(n) => Some(Value::Number(n.clone())),
            Self::Text(s) => Some(Value::String(s.clone())),
            Self::Chat(messages) => serde_json::to_value(messages).ok(),
            Self::Structured(v) => Some(v.clone()),
        }
    }

    /// The kind of this payload. `Undefined`/`Null` report `None`.
    #[must_use]
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Undefined | Self::Null => None,
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Number(_) => Some(ValueKind::Number),
            Self::Text(_) => Some(ValueKind::Text),
            Self::Chat(_) => Some(ValueKind::Chat),
            Self::Structured(_) => Some(ValueKind::Structured),
        }
    }

    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<Vec<ChatMessage>> for CellValue {
    fn from(value: Vec<ChatMessage>) -> Self {
        Self::Chat(value)
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Undefined | Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Chat(messages) => messages.serialize(serializer),
            Self::Structured(v) => v.serialize(serializer),
        }
    }
}
