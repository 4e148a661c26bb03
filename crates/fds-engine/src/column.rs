#![forbid(unsafe_code)]

//! Column lookup by id and/or title.
//!
//! Lookups never fail: an absent dataset or column list simply matches
//! nothing.

use fds_core::{Column, Dataset};

/// Partial column used as a lookup key. Every `Some` field must match
/// exactly; an empty filter matches every column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFilter {
    pub id: Option<String>,
    pub title: Option<String>,
}

impl ColumnFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on id only.
    #[must_use]
    pub fn by_id(id: impl Into<String>) -> Self {
        Self::new().with_id(id)
    }

    /// Filter on title only.
    #[must_use]
    pub fn by_title(title: impl Into<String>) -> Self {
        Self::new().with_title(title)
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Whether `column` satisfies every key of this filter.
    #[must_use]
    pub fn matches(&self, column: &Column) -> bool {
        self.id.as_deref().is_none_or(|id| column.id == id)
            && self.title.as_deref().is_none_or(|title| column.title == title)
    }
}

/// Where to look for columns: a whole dataset or a bare column list.
#[derive(Debug, Clone, Copy)]
pub enum ColumnSource<'a> {
    Dataset(Option<&'a Dataset>),
    Columns(Option<&'a [Column]>),
}

impl<'a> ColumnSource<'a> {
    /// The columns available in this source; empty when anything is absent.
    #[must_use]
    pub fn columns(self) -> &'a [Column] {
        match self {
            Self::Dataset(dataset) => dataset.map(Dataset::columns).unwrap_or(&[]),
            Self::Columns(columns) => columns.unwrap_or(&[]),
        }
    }
}

impl<'a> From<&'a Dataset> for ColumnSource<'a> {
    fn from(dataset: &'a Dataset) -> Self {
        Self::Dataset(Some(dataset))
    }
}

impl<'a> From<Option<&'a Dataset>> for ColumnSource<'a> {
    fn from(dataset: Option<&'a Dataset>) -> Self {
        Self::Dataset(dataset)
    }
}

impl<'a> From<&'a [Column]> for ColumnSource<'a> {
    fn from(columns: &'a [Column]) -> Self {
        Self::Columns(Some(columns))
    }
}

impl<'a> From<Option<&'a [Column]>> for ColumnSource<'a> {
    fn from(columns: Option<&'a [Column]>) -> Self {
        Self::Columns(columns)
    }
}

impl<'a> From<&'a Vec<Column>> for ColumnSource<'a> {
    fn from(columns: &'a Vec<Column>) -> Self {
        Self::Columns(Some(columns.as_slice()))
    }
}

/// Every column in `source` matching all keys of `filters`, in order.
pub fn find<'a>(source: impl Into<ColumnSource<'a>>, filters: &ColumnFilter) -> Vec<&'a Column> {
    source
        .into()
        .columns()
        .iter()
        .filter(|column| filters.matches(column))
        .collect()
}

/// The first column with the given id.
pub fn find_by_id<'a>(source: impl Into<ColumnSource<'a>>, id: &str) -> Option<&'a Column> {
    source.into().columns().iter().find(|column| column.id == id)
}
