#![forbid(unsafe_code)]

//! Error types for dataset operations.
//!
//! Lookup-style operations never fail: a missing dataset simply yields
//! `false`, `None` or an empty list. Structural operations that need a
//! search space (`get_parent`, `filter`) report a missing one as a
//! [`DatasetError`], since that is a caller bug and not "no data".

use std::fmt;

/// Errors produced by the dataset engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// A node list was required but absent.
    MissingNodes {
        /// Name of the operation that was called.
        operation: &'static str,
    },
    /// A dataset was required but absent.
    MissingDataset {
        /// Name of the operation that was called.
        operation: &'static str,
    },
    /// Dataset JSON could not be decoded.
    Parse(String),
}

impl DatasetError {
    /// Name of the operation that failed, if the error came from one.
    #[must_use]
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::MissingNodes { operation } | Self::MissingDataset { operation } => {
                Some(*operation)
            }
            Self::Parse(_) => None,
        }
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNodes { operation } => {
                write!(f, "{operation}: node list is null or undefined")
            }
            Self::MissingDataset { operation } => {
                write!(f, "{operation}: dataset is null or undefined")
            }
            Self::Parse(msg) => write!(f, "invalid dataset json: {msg}"),
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Standard result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
