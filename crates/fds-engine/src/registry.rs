#![forbid(unsafe_code)]

//! Shape registry: maps a shape tag to the spec used to resolve its cells.
//!
//! Each [`ShapeSpec`] declares which payload the shape expects, the alias
//! key its value is exposed under in a render-ready descriptor, and a
//! builder that adds shape-specific derived properties. New shapes are
//! added with [`ShapeRegistry::register`]; nothing else has to change.
//!
//! # Built-in aliases
//!
//! | Shape | Expects | Alias key |
//! |-------|---------|-----------|
//! | text, textfield, card, slot, canvas | any / text | `value` |
//! | number | number | `value` |
//! | toggle | bool | `checked` |
//! | button, chip | text | `label` |
//! | image, photoframe | text | `src` |
//! | badge | any | `content` |
//! | chart | structured | `data` |
//! | chat | chat | `messages` |
//! | code | text | `code` |
//! | upload | any | `files` |
//! | typewriter | text | `text` |
//! | progressbar | number | `value` |

use fds_core::{Cell, CellValue, Props, Shape, ValueKind};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Adds derived, shape-specific properties to a descriptor's prop bag.
pub type DescriptorBuilder = fn(&Cell, &mut Props);

/// How cells of one shape are resolved.
#[derive(Debug, Clone, Copy)]
pub struct ShapeSpec {
    value_kind: ValueKind,
    value_key: &'static str,
    build: DescriptorBuilder,
}

fn no_derived_props(_cell: &Cell, _props: &mut Props) {}

impl ShapeSpec {
    /// A spec with no derived properties.
    #[must_use]
    pub const fn new(value_kind: ValueKind, value_key: &'static str) -> Self {
        Self {
            value_kind,
            value_key,
            build: no_derived_props,
        }
    }

    /// Replace the descriptor builder.
    #[must_use]
    pub const fn with_builder(mut self, build: DescriptorBuilder) -> Self {
        self.build = build;
        self
    }

    /// Payload kind this shape expects.
    #[must_use]
    pub const fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    /// Alias key the value is exposed under, next to `value`.
    #[must_use]
    pub const fn value_key(&self) -> &'static str {
        self.value_key
    }

    /// Whether `value` fits this shape. Absent and null values always fit.
    #[must_use]
    pub fn accepts(&self, value: &CellValue) -> bool {
        match value.kind() {
            None => true,
            Some(kind) => self.value_kind == ValueKind::Any || self.value_kind == kind,
        }
    }

    /// Run the builder for `cell`.
    pub fn build(&self, cell: &Cell, props: &mut Props) {
        (self.build)(cell, props);
    }
}

fn progress_percent(cell: &Cell, props: &mut Props) {
    let Some(value) = cell.value.as_f64() else {
        return;
    };
    let max = cell
        .prop("max")
        .and_then(Value::as_f64)
        .filter(|max| *max > 0.0)
        .unwrap_or(100.0);
    let percent = (value / max * 100.0).clamp(0.0, 100.0);
    if let Some(number) = serde_json::Number::from_f64(percent) {
        props.insert("percent".into(), Value::Number(number));
    }
}

fn chat_message_count(cell: &Cell, props: &mut Props) {
    let count = match &cell.value {
        CellValue::Chat(messages) => messages.len(),
        CellValue::Structured(Value::Array(items)) => items.len(),
        _ => return,
    };
    props.insert("messageCount".into(), count.into());
}

fn chart_series_count(cell: &Cell, props: &mut Props) {
    if let CellValue::Structured(Value::Array(series)) = &cell.value {
        props.insert("seriesCount".into(), series.len().into());
    }
}

fn code_line_count(cell: &Cell, props: &mut Props) {
    if let Some(code) = cell.value.as_str() {
        props.insert("lineCount".into(), code.lines().count().into());
    }
}

/// Lookup table from shape tag to [`ShapeSpec`].
#[derive(Debug, Clone)]
pub struct ShapeRegistry {
    specs: HashMap<Shape, ShapeSpec>,
    fallback: ShapeSpec,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl ShapeRegistry {
    /// Spec used for shapes nobody registered.
    pub const FALLBACK: ShapeSpec = ShapeSpec::new(ValueKind::Any, "value");

    /// A registry with no shapes; every lookup hits the fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            specs: HashMap::new(),
            fallback: Self::FALLBACK,
        }
    }

    /// A registry with every built-in shape.
    #[must_use]
    pub fn standard() -> Self {
        use ValueKind::{Any, Bool, Chat, Number, Structured, Text};

        let mut registry = Self::empty();
        let builtins = [
            (Shape::Text, ShapeSpec::new(Any, "value")),
            (Shape::Number, ShapeSpec::new(Number, "value")),
            (Shape::Toggle, ShapeSpec::new(Bool, "checked")),
            (Shape::Button, ShapeSpec::new(Text, "label")),
            (Shape::Image, ShapeSpec::new(Text, "src")),
            (Shape::Badge, ShapeSpec::new(Any, "content")),
            (Shape::Card, ShapeSpec::new(Any, "value")),
            (
                Shape::Chart,
                ShapeSpec::new(Structured, "data").with_builder(chart_series_count),
            ),
            (
                Shape::Chat,
                ShapeSpec::new(Chat, "messages").with_builder(chat_message_count),
            ),
            (Shape::Chip, ShapeSpec::new(Text, "label")),
            (
                Shape::Code,
                ShapeSpec::new(Text, "code").with_builder(code_line_count),
            ),
            (Shape::Photoframe, ShapeSpec::new(Text, "src")),
            (Shape::Slot, ShapeSpec::new(Any, "value")),
            (Shape::Upload, ShapeSpec::new(Any, "files")),
            (Shape::Typewriter, ShapeSpec::new(Text, "text")),
            (Shape::Canvas, ShapeSpec::new(Any, "value")),
            (
                Shape::Progressbar,
                ShapeSpec::new(Number, "value").with_builder(progress_percent),
            ),
            (Shape::Textfield, ShapeSpec::new(Text, "value")),
        ];
        for (shape, spec) in builtins {
            registry.register(shape, spec);
        }
        registry
    }

    /// Process-wide standard registry used by the plain resolver functions.
    #[must_use]
    pub fn global() -> &'static ShapeRegistry {
        static GLOBAL: OnceLock<ShapeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::standard)
    }

    /// Add or replace the spec for `shape`, returning the previous one.
    pub fn register(&mut self, shape: impl Into<Shape>, spec: ShapeSpec) -> Option<ShapeSpec> {
        self.specs.insert(shape.into(), spec)
    }

    /// Change the spec used for unregistered shapes.
    #[must_use]
    pub fn with_fallback(mut self, spec: ShapeSpec) -> Self {
        self.fallback = spec;
        self
    }

    /// The spec for `shape`, or the fallback.
    #[must_use]
    pub fn spec(&self, shape: &Shape) -> &ShapeSpec {
        self.specs.get(shape).unwrap_or(&self.fallback)
    }

    #[must_use]
    pub fn contains(&self, shape: &Shape) -> bool {
        self.specs.contains_key(shape)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
