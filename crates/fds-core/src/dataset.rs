#![forbid(unsafe_code)]

//! The dataset container: columns plus root-level nodes.

use crate::error::Result;
use crate::node::Node;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A column descriptor correlating cell keys with display titles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
}

impl Column {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Root aggregate handed to every engine operation.
///
/// Both lists are optional: `None` stands for a `null` or absent list and is
/// kept distinct from an empty one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub columns: Option<Vec<Column>>,
    #[serde(default)]
    pub nodes: Option<Vec<Node>>,
}

impl Dataset {
    /// An empty dataset with neither columns nor nodes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = Some(columns);
        self
    }

    #[must_use]
    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = Some(nodes);
        self
    }

    /// Decode a dataset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a dataset from an already parsed JSON value.
    pub fn from_json_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Root nodes; empty when absent.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        self.nodes.as_deref().unwrap_or(&[])
    }

    /// Columns; empty when absent.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        self.columns.as_deref().unwrap_or(&[])
    }

    /// Total number of nodes at every depth.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut stack: Vec<&Node> = self.nodes().iter().collect();
        let mut count = 0;
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }
}
