//! Per-column metadata: inferred type, histogram, and missing-value report.

use crate::{
    data::Table,
    histogram::{self, ColumnHistogram},
    inference::{self, ColumnType},
    nulls::{self, NullError},
};

/// Source of derived column metadata used by the reducer.
///
/// The reducer only ever calls [`MetadataProvider::describe`] for columns whose values are new,
/// which lets tests count recomputations with a wrapping provider.
pub trait MetadataProvider {
    fn infer_type(&self, table: &Table, column: &str) -> ColumnType;

    fn histogram(&self, table: &Table, column: &str, column_type: ColumnType) -> ColumnHistogram;

    fn detect_nulls(&self, table: &Table, column: &str) -> NullError;

    fn describe(&self, table: &Table, column: &str) -> ColumnMetadata {
        let column_type = self.infer_type(table, column);
        ColumnMetadata {
            column_type,
            histogram: self.histogram(table, column, column_type),
            nulls: self.detect_nulls(table, column),
        }
    }
}

/// The provider backed by [`inference`], [`histogram`], and [`nulls`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMetadata;

impl MetadataProvider for StandardMetadata {
    fn infer_type(&self, table: &Table, column: &str) -> ColumnType {
        inference::infer_column_type(table, column)
    }

    fn histogram(&self, table: &Table, column: &str, column_type: ColumnType) -> ColumnHistogram {
        histogram::column_histogram(table, column, column_type)
    }

    fn detect_nulls(&self, table: &Table, column: &str) -> NullError {
        nulls::detect_nulls(table, column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    pub column_type: ColumnType,
    pub histogram: ColumnHistogram,
    pub nulls: NullError,
}
