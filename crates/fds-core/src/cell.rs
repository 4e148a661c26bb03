#![forbid(unsafe_code)]

//! Typed cells attached to nodes.

use crate::shape::Shape;
use crate::value::{CellValue, ValueKind};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Free-form property bag (shape styling, host attributes).
pub type Props = Map<String, Value>;

/// A shape-discriminated value attached to a node.
///
/// In JSON a cell is a flat object: `shape`, `value`, an optional `host`
/// object of pass-through attributes, and any other keys as shape props.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub shape: Shape,
    pub value: CellValue,
    /// Shape-specific styling and behavior properties.
    pub props: Props,
    /// Pass-through attributes for the host element.
    pub host: Props,
}

impl Cell {
    /// Create a cell of the given shape.
    #[must_use]
    pub fn new(shape: impl Into<Shape>, value: impl Into<CellValue>) -> Self {
        Self {
            shape: shape.into(),
            value: value.into(),
            props: Props::new(),
            host: Props::new(),
        }
    }

    /// Create a `text` cell.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(Shape::Text, CellValue::Text(value.into()))
    }

    /// Set a shape property.
    #[must_use]
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Set a host attribute.
    #[must_use]
    pub fn with_host_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.host.insert(key.into(), value.into());
        self
    }

    /// Look up a shape property.
    #[must_use]
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }
}

impl From<Shape> for Cell {
    fn from(shape: Shape) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("shape", &self.shape)?;
        if !self.value.is_undefined() {
            map.serialize_entry("value", &self.value)?;
        }
        for (key, value) in &self.props {
            map.serialize_entry(key, value)?;
        }
        if !self.host.is_empty() {
            map.serialize_entry("host", &self.host)?;
        }
        map.end()
    }
}

/// Wire form used while decoding; `value: Some(Value::Null)` keeps an
/// explicit `null` apart from a missing key.
#[derive(Deserialize)]
struct RawCell {
    #[serde(default)]
    shape: Option<Shape>,
    #[serde(default, deserialize_with = "present")]
    value: Option<Value>,
    #[serde(default)]
    host: Props,
    #[serde(flatten)]
    props: Props,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCell::deserialize(deserializer)?;
        let shape = raw.shape.unwrap_or_default();
        let kind = if shape == Shape::Chat {
            ValueKind::Chat
        } else {
            ValueKind::Any
        };
        let value = raw
            .value
            .map(|v| CellValue::from_json_as(v, kind))
            .unwrap_or_default();
        Ok(Self {
            shape,
            value,
            props: raw.props,
            host: raw.host,
        })
    }
}
