#![forbid(unsafe_code)]

//! FrankenDS public facade crate.
//!
//! Re-exports the data model from `fds-core` and the dataset operations
//! from `fds-engine`, plus a prelude for components that render datasets.
//!
//! ```
//! use fds::prelude::*;
//!
//! let dataset = Dataset::from_json_str(
//!     r#"{"columns":[{"id":"name","title":"Name"}],
//!         "nodes":[{"id":"r","value":"Root","cells":{"name":{"shape":"text","value":"John"}}}]}"#,
//! )?;
//! assert_eq!(column::find(&dataset, &ColumnFilter::by_id("name")).len(), 1);
//! assert!(cell::exists(dataset.nodes().first()));
//! # Ok::<(), fds::Error>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use fds_core::{
    Cell, CellValue, Cells, ChatMessage, Column, Dataset, Node, NodeValue, Props, Shape,
    ValueKind,
};

// --- Engine re-exports -----------------------------------------------------

pub use fds_engine::{
    ColumnFilter, ColumnSource, DescriptorBuilder, DrilldownInfo, FilterOptions, FilterResult,
    NodeFilter, NodePatch, NodePath, NodeRole, PreOrder, ShapeDescriptor, ShapeMap, ShapeRegistry,
    ShapeSpec, cell, column, node, registry, stringify,
};

#[cfg(feature = "tracing-json")]
pub use fds_core::logging::init_json_subscriber;

pub use fds_core as core;
pub use fds_engine as engine;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for dataset operations.
pub type Error = fds_core::DatasetError;

/// Standard result type for fds APIs.
pub type Result<T> = fds_core::Result<T>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Cell, CellValue, Column, ColumnFilter, Dataset, Error, FilterOptions, FilterResult, Node,
        NodeFilter, NodePatch, NodeValue, Result, Shape, ShapeDescriptor,
    };

    pub use crate::{cell, column, core, engine, node};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn prelude_covers_round_trip() {
        let json = serde_json::json!({
            "columns": [{"id": "name", "title": "Name"}],
            "nodes": [
                {"id": "", "value": "Root", "children": [{"id": "", "value": "Leaf"}]}
            ]
        });
        let mut dataset = Dataset::from_json_value(json).unwrap();
        node::fix_ids(dataset.nodes.as_mut().unwrap());

        let ids: Vec<&str> = node::to_stream(dataset.nodes())
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ids, ["node-0", "node-0-0"]);

        let result = node::filter(Some(&dataset), &NodeFilter::by_value("Leaf"), false).unwrap();
        assert_eq!(result.matching_ids(), ["node-0-0"]);
        assert!(result.is_visible("node-0"));
    }

    #[test]
    fn errors_surface_through_facade() {
        let err: Error = node::filter(None, &NodeFilter::new(), false).unwrap_err();
        assert_eq!(err.operation(), Some("filter"));
        assert!(Dataset::from_json_str("{").is_err());
    }
}
