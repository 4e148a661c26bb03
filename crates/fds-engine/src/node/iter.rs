#![forbid(unsafe_code)]

//! Depth-first pre-order walking and index paths.

use fds_core::Node;
use std::fmt;

/// Pre-order iterator over a node forest.
///
/// Roots come first in order, and each node is followed by its whole
/// subtree before the next sibling. Uses an explicit stack, so tree depth is
/// bounded by memory rather than the call stack.
#[derive(Debug, Clone)]
pub struct PreOrder<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> PreOrder<'a> {
    #[must_use]
    pub fn new(nodes: &'a [Node]) -> Self {
        Self {
            stack: nodes.iter().rev().map(|node| (1, node)).collect(),
        }
    }

    /// Yield `(depth, node)` pairs instead; roots have depth 1.
    #[must_use]
    pub fn with_depth(self) -> WithDepth<'a> {
        WithDepth(self)
    }

    fn next_entry(&mut self) -> Option<(usize, &'a Node)> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().map(|(_, node)| node)
    }
}

/// Pre-order iterator yielding depths alongside nodes.
#[derive(Debug, Clone)]
pub struct WithDepth<'a>(PreOrder<'a>);

impl<'a> Iterator for WithDepth<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next_entry()
    }
}

/// Position of a node as child indices from the root list.
///
/// `[2, 0]` is the first child of the third root. Paths stay valid only
/// while the tree is not restructured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the root at `index`.
    #[must_use]
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path of this node's child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Path of the parent, or `None` for roots and the empty path.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self.0.len() {
            0 | 1 => None,
            len => Some(Self(self.0[..len - 1].to_vec())),
        }
    }

    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Number of levels; roots have depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}
