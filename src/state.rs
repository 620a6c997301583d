//! The wrangler state and the reducer that keeps its derived metadata in step with the table.
//!
//! A [`WranglerState`] owns the table, the display order of its columns, three metadata maps
//! keyed by column name (type, histogram, nulls), and the [`HistoryLog`]. Every map is keyed by
//! exactly the names in `column_order`, and every row carries exactly those keys.
//!
//! ## Recomputation scope
//!
//! | operation | metadata work |
//! |---|---|
//! | load | every column |
//! | drop, rename | keys removed or moved, nothing recomputed |
//! | split, merge, substring | new columns only, inserted right after the source column |
//! | uppercase, lowercase, titlecase | none; the source column keeps its earlier metadata |
//!
//! [`WranglerState::apply`] takes `&self` and returns a new state, so earlier states stay valid
//! snapshots. An operation whose transform finds no applicable target returns an identical
//! state and does not grow the history.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    data::Table,
    error::WranglerError,
    histogram::ColumnHistogram,
    history::HistoryLog,
    inference::ColumnType,
    metadata::{ColumnMetadata, MetadataProvider, StandardMetadata},
    nulls::NullError,
    operation::Operation,
    transform,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WranglerState {
    table: Table,
    column_order: Vec<String>,
    column_types: BTreeMap<String, ColumnType>,
    histograms: BTreeMap<String, ColumnHistogram>,
    null_errors: BTreeMap<String, NullError>,
    history: HistoryLog,
}

impl WranglerState {
    /// Loads `table`, ordering columns by the keys of its first row.
    pub fn load(table: Table) -> Self {
        Self::load_with(table, None, &StandardMetadata)
    }

    /// Loads `table` with an explicit column order, such as a CSV header row.
    pub fn load_ordered(table: Table, column_order: Vec<String>) -> Self {
        Self::load_with(table, Some(column_order), &StandardMetadata)
    }

    /// Computes metadata for every column once. Names in `column_order` that the table does not
    /// carry are ignored and table columns missing from it are appended, so the order always
    /// matches the row keys.
    pub fn load_with<P: MetadataProvider>(
        table: Table,
        column_order: Option<Vec<String>>,
        provider: &P,
    ) -> Self {
        let present = table.column_names();
        let column_order = match column_order {
            Some(requested) => {
                let mut seen = BTreeSet::new();
                let mut ordered = requested
                    .into_iter()
                    .filter(|name| table.has_column(name) && seen.insert(name.clone()))
                    .collect::<Vec<_>>();
                ordered.extend(present.into_iter().filter(|name| !seen.contains(name)));
                ordered
            }
            None => present,
        };

        let mut state = WranglerState {
            table,
            column_order: Vec::with_capacity(column_order.len()),
            ..Default::default()
        };
        for column in column_order {
            let metadata = provider.describe(&state.table, &column);
            state.insert_column(state.column_order.len(), column, metadata);
        }
        info!(
            "Loaded {} row(s) across {} column(s)",
            state.table.len(),
            state.column_order.len()
        );
        state
    }

    /// Replays `operations` on a freshly loaded `table`.
    pub fn replay<'a, I>(table: Table, column_order: Option<Vec<String>>, operations: I) -> Self
    where
        I: IntoIterator<Item = &'a Operation>,
    {
        let provider = StandardMetadata;
        let initial = Self::load_with(table, column_order, &provider);
        operations
            .into_iter()
            .fold(initial, |state, operation| state.apply_with(operation, &provider))
    }

    pub fn apply(&self, operation: &Operation) -> Self {
        self.apply_with(operation, &StandardMetadata)
    }

    /// Applies an operation given in wire form (`kind` plus JSON payload).
    pub fn apply_wire(&self, kind: &str, payload: serde_json::Value) -> Result<Self, WranglerError> {
        let operation = Operation::from_wire(kind, payload)?;
        Ok(self.apply(&operation))
    }

    pub fn apply_with<P: MetadataProvider>(&self, operation: &Operation, provider: &P) -> Self {
        let Some(table) = transform::apply_operation(&self.table, operation) else {
            warn!(
                "Skipping {} on column '{}': no applicable target",
                operation.kind(),
                operation.source_column()
            );
            return self.clone();
        };

        let mut next = WranglerState {
            table,
            ..self.clone_metadata()
        };
        let recomputed: Vec<&str> = match operation {
            Operation::Drop(p) => {
                next.remove_column(&p.column);
                Vec::new()
            }
            Operation::Rename(p) => {
                next.rename_column(&p.column, &p.new_name);
                Vec::new()
            }
            Operation::Split(p) => {
                let added = [p.first_split.as_str(), p.second_split.as_str()];
                next.add_columns_after(&p.column, &added, provider);
                added.to_vec()
            }
            Operation::Merge(p) => {
                let added = [p.merged_column_name.as_str()];
                next.add_columns_after(&p.column, &added, provider);
                added.to_vec()
            }
            Operation::Substring(p) => {
                let added = [p.column_name.as_str()];
                next.add_columns_after(&p.column, &added, provider);
                added.to_vec()
            }
            Operation::Uppercase(_) | Operation::Lowercase(_) | Operation::Titlecase(_) => {
                Vec::new()
            }
        };
        let entry = next.history.record(operation.clone());
        debug!(
            "Applied {} to column '{}' as history entry {} (recomputed: {:?})",
            entry.kind(),
            operation.source_column(),
            entry.id(),
            recomputed
        );
        next
    }

    /// Verifies that the metadata maps and every row are keyed exactly by `column_order`.
    pub fn check_consistency(&self) -> Result<(), WranglerError> {
        let expected = self.column_order.iter().collect::<BTreeSet<_>>();
        if expected.len() != self.column_order.len() {
            return Err(WranglerError::Inconsistent(format!(
                "column order contains duplicates: {:?}",
                self.column_order
            )));
        }
        check_keys("column types", &expected, self.column_types.keys())?;
        check_keys("histograms", &expected, self.histograms.keys())?;
        check_keys("null errors", &expected, self.null_errors.keys())?;
        for (idx, row) in self.table.rows().iter().enumerate() {
            check_keys(&format!("row {idx}"), &expected, row.keys())?;
        }
        Ok(())
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn column_order(&self) -> &[String] {
        &self.column_order
    }

    pub fn column_types(&self) -> &BTreeMap<String, ColumnType> {
        &self.column_types
    }

    pub fn histograms(&self) -> &BTreeMap<String, ColumnHistogram> {
        &self.histograms
    }

    pub fn null_errors(&self) -> &BTreeMap<String, NullError> {
        &self.null_errors
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn column_type(&self, column: &str) -> Option<ColumnType> {
        self.column_types.get(column).copied()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.column_order.iter().position(|name| name == column)
    }

    fn clone_metadata(&self) -> WranglerState {
        WranglerState {
            table: Table::default(),
            column_order: self.column_order.clone(),
            column_types: self.column_types.clone(),
            histograms: self.histograms.clone(),
            null_errors: self.null_errors.clone(),
            history: self.history.clone(),
        }
    }

    fn insert_column(&mut self, index: usize, column: String, metadata: ColumnMetadata) {
        self.column_types.insert(column.clone(), metadata.column_type);
        self.histograms.insert(column.clone(), metadata.histogram);
        self.null_errors.insert(column.clone(), metadata.nulls);
        let index = index.min(self.column_order.len());
        self.column_order.insert(index, column);
    }

    fn remove_column(&mut self, column: &str) {
        self.column_order.retain(|name| name != column);
        self.column_types.remove(column);
        self.histograms.remove(column);
        self.null_errors.remove(column);
    }

    fn rename_column(&mut self, old_name: &str, new_name: &str) {
        if let Some(slot) = self.column_order.iter_mut().find(|name| *name == old_name) {
            *slot = new_name.to_string();
        }
        if let Some(column_type) = self.column_types.remove(old_name) {
            self.column_types.insert(new_name.to_string(), column_type);
        }
        if let Some(histogram) = self.histograms.remove(old_name) {
            self.histograms.insert(new_name.to_string(), histogram);
        }
        if let Some(nulls) = self.null_errors.remove(old_name) {
            self.null_errors.insert(new_name.to_string(), nulls);
        }
    }

    fn add_columns_after<P: MetadataProvider>(
        &mut self,
        source: &str,
        columns: &[&str],
        provider: &P,
    ) {
        let start = self
            .column_index(source)
            .map_or(self.column_order.len(), |idx| idx + 1);
        for (offset, column) in columns.iter().enumerate() {
            let metadata = provider.describe(&self.table, column);
            self.insert_column(start + offset, column.to_string(), metadata);
        }
    }
}

fn check_keys<'a, I>(
    label: &str,
    expected: &BTreeSet<&String>,
    actual: I,
) -> Result<(), WranglerError>
where
    I: Iterator<Item = &'a String>,
{
    let actual = actual.collect::<BTreeSet<_>>();
    if &actual == expected {
        return Ok(());
    }
    let missing = expected.difference(&actual).collect::<Vec<_>>();
    let orphaned = actual.difference(expected).collect::<Vec<_>>();
    Err(WranglerError::Inconsistent(format!(
        "{label} keys differ from column order (missing: {missing:?}, orphaned: {orphaned:?})"
    )))
}
