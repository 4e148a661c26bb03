#![forbid(unsafe_code)]

//! In-place tree mutation: removal, bulk property assignment, id repair.

use super::iter::{NodePath, PreOrder};
use fds_core::{Cells, Node, NodeValue, debug, debug_span, trace};
use std::collections::HashSet;

/// Remove the first node (pre-order) equal to `target` and return it.
///
/// Matching is structural: callers cannot hold a borrow into a tree they
/// are mutating, so they pass an equal copy. Use [`pop_at`] to remove by
/// position instead.
pub fn pop(nodes: &mut Vec<Node>, target: &Node) -> Option<Node> {
    let path = super::find_path(nodes, |node| node == target)?;
    pop_at(nodes, &path)
}

/// Remove the node at `path` and return it.
pub fn pop_at(nodes: &mut Vec<Node>, path: &NodePath) -> Option<Node> {
    let (&last, parents) = path.indices().split_last()?;
    let mut siblings = nodes;
    for &index in parents {
        siblings = siblings.get_mut(index)?.children.as_mut()?;
    }
    (last < siblings.len()).then(|| siblings.remove(last))
}

/// Partial node merged onto existing nodes by [`set_properties`].
///
/// Every `Some` field overwrites the node's field; `cells` replaces the
/// whole cell map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub id: Option<String>,
    pub value: Option<NodeValue>,
    pub cells: Option<Cells>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub css_style: Option<String>,
    pub is_disabled: Option<bool>,
}

impl NodePatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<NodeValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_cells(mut self, cells: Cells) -> Self {
        self.cells = Some(cells);
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

    /// Merge this patch onto `node`.
    pub fn apply(&self, node: &mut Node) {
        if let Some(id) = &self.id {
            node.id.clone_from(id);
        }
        if let Some(value) = &self.value {
            node.value = Some(value.clone());
        }
        if let Some(cells) = &self.cells {
            node.cells = Some(cells.clone());
        }
        if let Some(description) = &self.description {
            node.description = Some(description.clone());
        }
        if let Some(icon) = &self.icon {
            node.icon = Some(icon.clone());
        }
        if let Some(css) = &self.css_style {
            node.css_style = Some(css.clone());
        }
        if let Some(disabled) = self.is_disabled {
            node.is_disabled = Some(disabled);
        }
    }
}

/// Merge `properties` onto every node in `nodes`, and onto all descendants
/// when `recursively` is set.
///
/// Nodes whose id is listed in `exclude` keep their fields; their children
/// are still visited. Returns `nodes` for chaining.
pub fn set_properties<'a>(
    nodes: &'a mut [Node],
    properties: &NodePatch,
    recursively: bool,
    exclude: &[&str],
) -> &'a mut [Node] {
    let mut stack: Vec<&mut Node> = nodes.iter_mut().collect();
    while let Some(node) = stack.pop() {
        if !exclude.contains(&node.id.as_str()) {
            properties.apply(node);
        }
        if recursively {
            if let Some(children) = node.children.as_mut() {
                stack.extend(children.iter_mut());
            }
        }
    }
    nodes
}

/// Make every id in the tree non-empty and unique.
///
/// Walks in pre-order; the first occurrence of an id keeps it. Empty or
/// repeated ids become `<parent-id>-<index>` (`node-<index>` for roots),
/// with a numeric suffix appended while that is taken by any node in the
/// tree, so a valid id further down is never displaced. A tree that is
/// already valid is left untouched, so the operation is idempotent.
pub fn fix_ids(nodes: &mut [Node]) -> &mut [Node] {
    let _span = debug_span!("dataset.fix_ids").entered();
    let mut taken: HashSet<String> = PreOrder::new(nodes)
        .filter(|node| !node.id.trim().is_empty())
        .map(|node| node.id.clone())
        .collect();
    let mut seen = HashSet::new();
    let mut rewritten = 0usize;

    let mut stack: Vec<(Option<String>, usize, &mut Node)> = nodes
        .iter_mut()
        .enumerate()
        .rev()
        .map(|(index, node)| (None, index, node))
        .collect();
    while let Some((parent_id, index, node)) = stack.pop() {
        if node.id.trim().is_empty() || seen.contains(&node.id) {
            let base = match parent_id {
                Some(parent) => format!("{parent}-{index}"),
                None => format!("node-{index}"),
            };
            let mut candidate = base.clone();
            let mut suffix = 1;
            while taken.contains(&candidate) {
                candidate = format!("{base}-{suffix}");
                suffix += 1;
            }
            trace!(from = node.id.as_str(), to = candidate.as_str(), "rewriting node id");
            taken.insert(candidate.clone());
            node.id = candidate;
            rewritten += 1;
        }
        seen.insert(node.id.clone());

        let id = node.id.clone();
        if let Some(children) = node.children.as_mut() {
            stack.extend(
                children
                    .iter_mut()
                    .enumerate()
                    .rev()
                    .map(|(index, child)| (Some(id.clone()), index, child)),
            );
        }
    }

    if rewritten > 0 {
        debug!(rewritten, unique = seen.len(), "ids repaired");
    }
    nodes
}
