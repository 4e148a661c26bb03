#![forbid(unsafe_code)]

//! Cell resolution: existence checks, render-ready shape descriptors,
//! per-shape aggregation, and value stringification.
//!
//! All functions here are soft-fail: missing input resolves to `false`, an
//! empty descriptor, or `None`, never an error.

use crate::node;
use crate::registry::{ShapeRegistry, ShapeSpec};
use fds_core::{Cell, CellValue, Dataset, Node, Props, Shape, debug, debug_span, warn};
use serde_json::{Number, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Descriptors grouped by shape, as returned by [`get_all_shapes`].
pub type ShapeMap<'a> = BTreeMap<Shape, Vec<ShapeDescriptor<'a>>>;

/// Render-ready view of one cell.
///
/// Borrowed descriptors point at the caller's cell; owned ones hold an
/// independent deep copy that may be mutated freely.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDescriptor<'a> {
    cell: Option<Cow<'a, Cell>>,
    value_key: &'static str,
}

impl<'a> ShapeDescriptor<'a> {
    /// Descriptor for a missing cell; renders as `{}`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cell: None,
            value_key: ShapeRegistry::FALLBACK.value_key(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cell.is_none()
    }

    /// Whether this descriptor shares the caller's cell.
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self.cell, Some(Cow::Borrowed(_)))
    }

    #[must_use]
    pub fn cell(&self) -> Option<&Cell> {
        self.cell.as_deref()
    }

    /// Mutable access to the cell. A borrowed descriptor is copied first.
    pub fn cell_mut(&mut self) -> Option<&mut Cell> {
        self.cell.as_mut().map(Cow::to_mut)
    }

    #[must_use]
    pub fn shape(&self) -> Option<&Shape> {
        self.cell().map(|cell| &cell.shape)
    }

    #[must_use]
    pub fn value(&self) -> Option<&CellValue> {
        self.cell().map(|cell| &cell.value)
    }

    /// Alias key the value is exposed under besides `value`.
    #[must_use]
    pub fn value_key(&self) -> &'static str {
        self.value_key
    }

    /// Detach from the source cell.
    #[must_use]
    pub fn into_owned(self) -> ShapeDescriptor<'static> {
        ShapeDescriptor {
            cell: self.cell.map(|cell| Cow::Owned(cell.into_owned())),
            value_key: self.value_key,
        }
    }

    /// Flat property bag handed to the renderer, using the global registry.
    #[must_use]
    pub fn to_props(&self) -> Props {
        self.to_props_with(ShapeRegistry::global())
    }

    /// Flat property bag: the cell's props, `shape`, the value under both
    /// `value` and the alias key, derived props, and `host` if present.
    #[must_use]
    pub fn to_props_with(&self, registry: &ShapeRegistry) -> Props {
        let Some(cell) = self.cell() else {
            return Props::new();
        };
        let spec = registry.spec(&cell.shape);
        let mut props = cell.props.clone();
        props.insert("shape".into(), Value::String(cell.shape.as_str().to_string()));
        if let Some(value) = cell.value.to_json() {
            if spec.value_key() != "value" {
                props.insert(spec.value_key().to_string(), value.clone());
            }
            props.insert("value".into(), value);
        }
        spec.build(cell, &mut props);
        if !cell.host.is_empty() {
            props.insert("host".into(), Value::Object(cell.host.clone()));
        }
        props
    }
}

impl Default for ShapeDescriptor<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

/// True when `node` exists and carries at least one cell.
#[must_use]
pub fn exists(node: Option<&Node>) -> bool {
    node.and_then(|node| node.cells.as_ref())
        .is_some_and(|cells| !cells.is_empty())
}

/// Resolve `cell` against the global registry. See [`get_shape_with`].
#[must_use]
pub fn get_shape(cell: Option<&Cell>, deep_copy: bool) -> ShapeDescriptor<'_> {
    get_shape_with(ShapeRegistry::global(), cell, deep_copy)
}

/// Resolve `cell` into a descriptor.
///
/// With `deep_copy` the descriptor owns a clone; otherwise it borrows the
/// very same cell. A value that does not fit the shape is logged and kept.
#[must_use]
pub fn get_shape_with<'a>(
    registry: &ShapeRegistry,
    cell: Option<&'a Cell>,
    deep_copy: bool,
) -> ShapeDescriptor<'a> {
    let Some(cell) = cell else {
        return ShapeDescriptor::empty();
    };
    let spec = registry.spec(&cell.shape);
    check_value(spec, cell);
    ShapeDescriptor {
        cell: Some(if deep_copy {
            Cow::Owned(cell.clone())
        } else {
            Cow::Borrowed(cell)
        }),
        value_key: spec.value_key(),
    }
}

fn check_value(spec: &ShapeSpec, cell: &Cell) {
    if !spec.accepts(&cell.value) {
        warn!(
            shape = cell.shape.as_str(),
            expected = ?spec.value_kind(),
            actual = ?cell.value.kind(),
            "cell value does not match its shape"
        );
    }
}

/// Group every cell in `dataset` by shape, using the global registry.
#[must_use]
pub fn get_all_shapes(dataset: Option<&Dataset>, deep_copy: bool) -> Option<ShapeMap<'_>> {
    get_all_shapes_with(ShapeRegistry::global(), dataset, deep_copy)
}

/// Group every cell of every node (pre-order, cells in key order) by shape.
///
/// Returns `None` when there is nothing to traverse: a missing dataset, or
/// `nodes` absent or empty. Nodes without cells give `Some` of an empty map.
#[must_use]
pub fn get_all_shapes_with<'a>(
    registry: &ShapeRegistry,
    dataset: Option<&'a Dataset>,
    deep_copy: bool,
) -> Option<ShapeMap<'a>> {
    let nodes = dataset?.nodes.as_deref().filter(|nodes| !nodes.is_empty())?;
    let _span = debug_span!("dataset.get_all_shapes", deep_copy).entered();

    let mut shapes = ShapeMap::new();
    for node in node::iter(nodes) {
        for (_, cell) in node.cells() {
            shapes
                .entry(cell.shape.clone())
                .or_default()
                .push(get_shape_with(registry, Some(cell), deep_copy));
        }
    }
    debug!(shapes = shapes.len(), "collected cell shapes");
    Some(shapes)
}

/// Display form of a cell value.
///
/// Text is returned as-is, numbers and booleans in their usual form,
/// `Null`/`Undefined` as the literals `"null"`/`"undefined"`, and
/// structured values as pretty JSON with sorted keys.
#[must_use]
pub fn stringify(value: &CellValue) -> String {
    match value {
        CellValue::Undefined => "undefined".to_string(),
        CellValue::Null => "null".to_string(),
        CellValue::Bool(b) => b.to_string(),
        CellValue::Number(n) => stringify_number(n),
        CellValue::Text(text) => text.clone(),
        CellValue::Chat(_) | CellValue::Structured(_) => match value.to_json() {
            Some(json) => stringify_json(&json),
            None => "undefined".to_string(),
        },
    }
}

/// Display form of an arbitrary JSON value, following [`stringify`].
#[must_use]
pub fn stringify_json(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        Value::Number(n) => stringify_number(n),
        other => other.to_string(),
    }
}

// Integral floats (`30.0`, `1e3`) print without a fraction, like integers.
fn stringify_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fds_core::ChatMessage;
    use serde_json::json;

    #[test]
    fn exists_requires_cells() {
        assert!(!exists(None));
        assert!(!exists(Some(&Node::new("n").with_value("v"))));
        let mut empty = Node::new("n");
        empty.cells = Some(Default::default());
        assert!(!exists(Some(&empty)));
        assert!(exists(Some(&Node::new("n").with_cell("name", Cell::text("John")))));
    }

    #[test]
    fn shallow_shape_is_same_reference() {
        let cell = Cell::text("John");
        let descriptor = get_shape(Some(&cell), false);
        assert!(descriptor.is_borrowed());
        assert!(std::ptr::eq(descriptor.cell().unwrap(), &cell));
    }

    #[test]
    fn deep_shape_is_independent() {
        let cell = Cell::new("card", json!({"title": "A", "tags": ["x"]}));
        let mut descriptor = get_shape(Some(&cell), true);
        assert!(!descriptor.is_borrowed());
        assert_eq!(descriptor.cell(), Some(&cell));
        assert!(!std::ptr::eq(descriptor.cell().unwrap(), &cell));

        descriptor.cell_mut().unwrap().value = CellValue::from("changed");
        assert_eq!(cell.value, CellValue::from(json!({"title": "A", "tags": ["x"]})));
    }

    #[test]
    fn missing_cell_is_empty_object() {
        let descriptor = get_shape(None, true);
        assert!(descriptor.is_empty());
        assert_eq!(Value::Object(descriptor.to_props()), json!({}));
    }

    #[test]
    fn props_expose_value_and_alias() {
        let cell = Cell::new("toggle", true).with_prop("size", "small");
        let props = get_shape(Some(&cell), false).to_props();
        assert_eq!(props.get("value"), Some(&json!(true)));
        assert_eq!(props.get("checked"), Some(&json!(true)));
        assert_eq!(props.get("shape"), Some(&json!("toggle")));
        assert_eq!(props.get("size"), Some(&json!("small")));
        assert!(!props.contains_key("host"));
    }

    #[test]
    fn props_include_host_and_derived() {
        let cell = Cell::new(Shape::Chat, vec![ChatMessage::new("user", "hi")])
            .with_host_attr("aria-label", "conversation");
        let props = get_shape(Some(&cell), true).to_props();
        assert_eq!(props.get("messageCount"), Some(&json!(1)));
        assert_eq!(props.get("messages"), props.get("value"));
        assert_eq!(props.get("host"), Some(&json!({"aria-label": "conversation"})));
    }

    #[test]
    fn undefined_value_is_not_exposed() {
        let props = get_shape(Some(&Cell::from(Shape::Slot)), false).to_props();
        assert!(!props.contains_key("value"));
        assert_eq!(props.get("shape"), Some(&json!("slot")));
    }

    #[test]
    fn mismatched_value_still_resolves() {
        let cell = Cell::new("number", "not a number");
        let descriptor = get_shape(Some(&cell), false);
        assert_eq!(descriptor.value(), Some(&CellValue::from("not a number")));
    }

    #[test]
    fn custom_registry_alias() {
        let mut registry = ShapeRegistry::standard();
        registry.register("rating", ShapeSpec::new(fds_core::ValueKind::Number, "stars"));
        let cell = Cell::new("rating", 4);
        let descriptor = get_shape_with(&registry, Some(&cell), false);
        assert_eq!(descriptor.value_key(), "stars");
        assert_eq!(descriptor.to_props_with(&registry).get("stars"), Some(&json!(4)));
    }

    #[test]
    fn into_owned_detaches() {
        let owned = {
            let cell = Cell::text("temp");
            get_shape(Some(&cell), false).into_owned()
        };
        assert!(!owned.is_borrowed());
        assert_eq!(owned.value(), Some(&CellValue::from("temp")));
    }

    #[test]
    fn stringify_primitives() {
        assert_eq!(stringify(&CellValue::from("John")), "John");
        assert_eq!(stringify(&CellValue::from(30)), "30");
        assert_eq!(stringify(&CellValue::from(true)), "true");
        assert_eq!(stringify(&CellValue::Null), "null");
        assert_eq!(stringify(&CellValue::Undefined), "undefined");
    }

    #[test]
    fn stringify_object_is_pretty_sorted() {
        let out = stringify(&CellValue::from(json!({"test": "value", "a": 1})));
        assert!(out.contains(r#""test": "value""#));
        assert_eq!(out, "{\n  \"a\": 1,\n  \"test\": \"value\"\n}");
    }

    #[test]
    fn stringify_chat_history() {
        let out = stringify(&CellValue::Chat(vec![ChatMessage::new("user", "hi")]));
        assert!(out.contains(r#""role": "user""#));
        assert!(out.starts_with('['));
    }

    #[test]
    fn stringify_integral_floats_drop_fraction() {
        assert_eq!(stringify(&CellValue::from(json!(30.0))), "30");
        assert_eq!(stringify(&CellValue::from(json!(1e3))), "1000");
        assert_eq!(stringify(&CellValue::from(json!(-4.0))), "-4");
        assert_eq!(stringify(&CellValue::from(json!(2.5))), "2.5");
        assert_eq!(stringify_json(&json!(7.0)), "7");
    }

    #[test]
    fn stringify_json_scalars() {
        assert_eq!(stringify_json(&json!("x")), "x");
        assert_eq!(stringify_json(&json!(2.5)), "2.5");
        assert_eq!(stringify_json(&json!(null)), "null");
    }
}
