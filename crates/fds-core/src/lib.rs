#![forbid(unsafe_code)]

//! Core data model for the FrankenDS dataset engine: datasets, columns,
//! nodes, typed cells, errors, and logging macros.

pub mod cell;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod node;
pub mod shape;
pub mod value;

pub use cell::{Cell, Props};
pub use dataset::{Column, Dataset};
pub use error::{DatasetError, Result};
pub use node::{Cells, Node};
pub use shape::Shape;
pub use value::{CellValue, ChatMessage, NodeValue, ValueKind};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
