use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data::Table;

/// Rows of a column holding missing data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullError {
    pub count: usize,
    pub rows: BTreeSet<usize>,
}

impl NullError {
    pub fn is_clean(&self) -> bool {
        self.count == 0
    }

    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }
}

/// Scans `column` for `Null`, empty strings, and absent keys. Zero and `false` are not missing.
pub fn detect_nulls(table: &Table, column: &str) -> NullError {
    let rows = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| row.get(column).is_none_or(|value| value.is_missing()))
        .map(|(idx, _)| idx)
        .collect::<BTreeSet<_>>();
    NullError {
        count: rows.len(),
        rows,
    }
}
