#![forbid(unsafe_code)]

//! Dataset engine for FrankenDS widgets.
//!
//! Pure functions over [`fds_core::Dataset`]: the components (tree, list,
//! card, masonry, chart, ...) hold a dataset and call in here to find,
//! filter, reshape and resolve what they render. Nothing is cached between
//! calls.
//!
//! - [`column`]: column lookup by id/title.
//! - [`cell`]: cell existence, shape descriptors, aggregation, stringify.
//! - [`registry`]: the shape-tag to [`ShapeSpec`] lookup table.
//! - [`node`]: traversal, filtering, and in-place mutation.
//!
//! # Example
//!
//! ```
//! use fds_core::{Cell, Dataset, Node};
//! use fds_engine::node::{self, NodeFilter};
//!
//! let dataset = Dataset::new().with_nodes(vec![
//!     Node::new("root")
//!         .with_value("Root")
//!         .child(Node::new("a").with_value("Child A").with_cell("name", Cell::text("A")))
//!         .child(Node::new("b").with_value("Child B")),
//! ]);
//!
//! let result = node::filter(Some(&dataset), &NodeFilter::by_value("A"), true).unwrap();
//! assert_eq!(result.matching_ids(), ["a"]);
//! assert_eq!(result.ancestor_nodes[0].id, "root");
//!
//! let shapes = fds_engine::cell::get_all_shapes(Some(&dataset), false).unwrap();
//! assert_eq!(shapes.len(), 1);
//! ```

pub mod cell;
pub mod column;
pub mod node;
pub mod registry;

pub use cell::{ShapeDescriptor, ShapeMap, stringify};
pub use column::{ColumnFilter, ColumnSource};
pub use node::{
    DrilldownInfo, FilterOptions, FilterResult, NodeFilter, NodePatch, NodePath, NodeRole, PreOrder,
};
pub use registry::{DescriptorBuilder, ShapeRegistry, ShapeSpec};
