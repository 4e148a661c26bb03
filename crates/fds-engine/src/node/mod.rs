#![forbid(unsafe_code)]

//! Node traversal and mutation.
//!
//! Every walk is depth-first pre-order: roots in order, each followed by its
//! whole subtree before the next sibling. [`find`], [`to_stream`] and
//! [`filter()`] all agree on this order.
//!
//! # Identity
//!
//! - [`get_parent`] matches the child by pointer first, then by structural
//!   equality, so both borrowed nodes and deserialized copies work.
//! - [`pop`] matches structurally; [`pop_at`] removes by [`NodePath`].
//! - [`set_properties`] exclusions and [`filter()`] criteria are id/value based.
//!
//! # Failure modes
//!
//! | Operation | Missing input |
//! |-----------|---------------|
//! | [`exists`], [`find`] | `false` / `None` |
//! | [`get_parent`] | `Err(MissingNodes)` |
//! | [`filter()`] | `Err(MissingDataset)` |

mod filter;
mod iter;
mod mutate;

pub use filter::{FilterOptions, FilterResult, NodeFilter, NodeRole, filter, filter_with};
pub use iter::{NodePath, PreOrder, WithDepth};
pub use mutate::{NodePatch, fix_ids, pop, pop_at, set_properties};

use fds_core::{Dataset, DatasetError, Node, Result, warn};
use std::ptr;

/// True when `dataset` exists and has at least one root node.
#[must_use]
pub fn exists(dataset: Option<&Dataset>) -> bool {
    dataset.is_some_and(|ds| !ds.nodes().is_empty())
}

/// Lazy pre-order walk over `nodes`.
#[must_use]
pub fn iter(nodes: &[Node]) -> PreOrder<'_> {
    PreOrder::new(nodes)
}

/// First node in pre-order satisfying `predicate`.
pub fn find<'a>(
    dataset: Option<&'a Dataset>,
    mut predicate: impl FnMut(&Node) -> bool,
) -> Option<&'a Node> {
    iter(dataset?.nodes()).find(|node| predicate(*node))
}

/// Direct parent of `child` within `nodes`.
///
/// `child` is first looked up by address across the whole tree. Only when
/// it is not part of the tree is it compared structurally, in which case
/// the parent of the first equal subtree in pre-order is returned.
/// `Ok(None)` when `child` is a root or not in the tree; an error when
/// `nodes` itself is missing.
pub fn get_parent<'a>(nodes: Option<&'a [Node]>, child: &Node) -> Result<Option<&'a Node>> {
    let nodes = nodes.ok_or_else(|| {
        warn!("get_parent called without a node list");
        DatasetError::MissingNodes {
            operation: "get_parent",
        }
    })?;
    if nodes.iter().any(|root| ptr::eq(root, child)) {
        return Ok(None);
    }
    let parent_of = |is_child: fn(&Node, &Node) -> bool| {
        iter(nodes).find(|parent| parent.children().iter().any(|c| is_child(c, child)))
    };
    Ok(parent_of(|c, child| ptr::eq(c, child)).or_else(|| parent_of(|c, child| c == child)))
}

/// Flatten `nodes` into pre-order without touching the tree.
#[must_use]
pub fn to_stream(nodes: &[Node]) -> Vec<&Node> {
    iter(nodes).collect()
}

/// Aggregate shape statistics used to size grid-like layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrilldownInfo {
    /// Deepest nesting level; roots are level 1, an empty forest is 0.
    pub max_depth: usize,
    /// Largest number of direct children under any single node.
    pub max_children: usize,
    /// Number of nodes at every depth.
    pub total_nodes: usize,
}

/// Compute [`DrilldownInfo`] for the forest `nodes`.
#[must_use]
pub fn get_drilldown_info(nodes: &[Node]) -> DrilldownInfo {
    iter(nodes)
        .with_depth()
        .fold(DrilldownInfo::default(), |info, (depth, node)| DrilldownInfo {
            max_depth: info.max_depth.max(depth),
            max_children: info.max_children.max(node.children().len()),
            total_nodes: info.total_nodes + 1,
        })
}

/// Index path of the first node in pre-order satisfying `predicate`.
pub fn find_path(nodes: &[Node], mut predicate: impl FnMut(&Node) -> bool) -> Option<NodePath> {
    let mut path = Vec::new();
    let mut stack: Vec<(usize, usize, &Node)> = nodes
        .iter()
        .enumerate()
        .rev()
        .map(|(index, node)| (0, index, node))
        .collect();
    while let Some((depth, index, node)) = stack.pop() {
        path.truncate(depth);
        path.push(index);
        if predicate(node) {
            return Some(NodePath::from(path));
        }
        stack.extend(
            node.children()
                .iter()
                .enumerate()
                .rev()
                .map(|(index, child)| (depth + 1, index, child)),
        );
    }
    None
}

/// Node at `path`, if it exists.
#[must_use]
pub fn node_at_path<'a>(nodes: &'a [Node], path: &NodePath) -> Option<&'a Node> {
    let (&first, rest) = path.indices().split_first()?;
    let mut current = nodes.get(first)?;
    for &index in rest {
        current = current.children().get(index)?;
    }
    Some(current)
}

/// Mutable node at `path`, if it exists.
pub fn node_at_path_mut<'a>(nodes: &'a mut [Node], path: &NodePath) -> Option<&'a mut Node> {
    let (&first, rest) = path.indices().split_first()?;
    let mut current = nodes.get_mut(first)?;
    for &index in rest {
        current = current.children.as_mut()?.get_mut(index)?;
    }
    Some(current)
}
