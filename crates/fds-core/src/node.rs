#![forbid(unsafe_code)]

//! Tree nodes.

use crate::cell::Cell;
use crate::value::NodeValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cells of a node, keyed by an arbitrary cell key.
pub type Cells = BTreeMap<String, Cell>;

/// A node in the dataset hierarchy.
///
/// `id` is used for identity comparisons but is not guaranteed unique;
/// decoding tolerates a missing id (it becomes empty) so partial data can
/// be loaded and repaired afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<NodeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells: Option<Cells>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,
}

impl Node {
    /// Create a leaf node with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let mut node = Self::default();
        node.id = id.into();
        node
    }

    /// Add a child node.
    #[must_use]
    pub fn child(mut self, node: Node) -> Self {
        self.children.get_or_insert_with(Vec::new).push(node);
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<Node>) -> Self {
        self.children = Some(nodes);
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<NodeValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach a cell under `key`.
    #[must_use]
    pub fn with_cell(mut self, key: impl Into<String>, cell: Cell) -> Self {
        self.cells
            .get_or_insert_with(Cells::new)
            .insert(key.into(), cell);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_css_style(mut self, css: impl Into<String>) -> Self {
        self.css_style = Some(css.into());
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.is_disabled = Some(disabled);
        self
    }

    /// Children of this node; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Mutable children, if the node has a child list.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        self.children.as_mut()
    }

    /// Whether this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Look up a cell by key.
    #[must_use]
    pub fn cell(&self, key: &str) -> Option<&Cell> {
        self.cells.as_ref()?.get(key)
    }

    /// Iterate over `(key, cell)` pairs in key order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells
            .iter()
            .flat_map(|cells| cells.iter().map(|(k, c)| (k.as_str(), c)))
    }
}

// Drop detaches descendants onto a heap stack so arbitrarily deep chains
// never recurse through `drop_in_place`.
impl Drop for Node {
    fn drop(&mut self) {
        let Some(mut stack) = self.children.take() else {
            return;
        };
        while let Some(mut node) = stack.pop() {
            if let Some(children) = node.children.take() {
                stack.extend(children);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_shapes_tree() {
        let node = Node::new("root")
            .with_value("Root")
            .child(Node::new("a").child(Node::new("a1")))
            .child(Node::new("b"));
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.children()[0].children()[0].id, "a1");
        assert!(node.children()[1].is_leaf());
        assert!(!node.is_leaf());
    }

    #[test]
    fn camel_case_fields() {
        let node: Node = serde_json::from_value(json!({
            "id": "n1",
            "cssStyle": "color: red",
            "isDisabled": true
        }))
        .unwrap();
        assert_eq!(node.css_style.as_deref(), Some("color: red"));
        assert_eq!(node.is_disabled, Some(true));
        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["cssStyle"], json!("color: red"));
    }

    #[test]
    fn missing_id_decodes_empty() {
        let node: Node = serde_json::from_value(json!({"value": 3})).unwrap();
        assert!(node.id.is_empty());
    }

    #[test]
    fn dropping_deep_chain_does_not_recurse() {
        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(|| {
                let mut node = Node::new("leaf");
                for level in 0..100_000 {
                    node = Node::new(format!("n{level}")).child(node);
                }
                drop(node);
            })
            .unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn cells_iterate_in_key_order() {
        let node = Node::new("n")
            .with_cell("b", Cell::text("B"))
            .with_cell("a", Cell::text("A"));
        let keys: Vec<&str> = node.cells().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert!(node.cell("a").is_some());
        assert!(Node::new("bare").cell("a").is_none());
    }
}
