//! Text and JSON views over a [`WranglerState`] for the command-line shell.

use serde::Serialize;

use crate::{
    histogram::ColumnHistogram,
    inference::ColumnType,
    state::WranglerState,
    table::{Align, TextTable},
};

/// One column's metadata, flattened for display.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnProfile<'a> {
    pub position: usize,
    pub name: &'a str,
    pub column_type: Option<ColumnType>,
    pub null_count: usize,
    pub histogram: Option<&'a ColumnHistogram>,
}

pub fn column_profiles(state: &WranglerState) -> Vec<ColumnProfile<'_>> {
    state
        .column_order()
        .iter()
        .enumerate()
        .map(|(idx, name)| ColumnProfile {
            position: idx + 1,
            name,
            column_type: state.column_type(name),
            null_count: state
                .null_errors()
                .get(name)
                .map(|nulls| nulls.count)
                .unwrap_or_default(),
            histogram: state.histograms().get(name),
        })
        .collect()
}

pub fn render_profile(state: &WranglerState) -> String {
    let mut table = TextTable::new(["#", "column", "type", "nulls", "histogram"])
        .align(0, Align::Right)
        .align(3, Align::Right);
    for profile in column_profiles(state) {
        table.push_row(vec![
            profile.position.to_string(),
            profile.name.to_string(),
            profile
                .column_type
                .map(|ty| ty.to_string())
                .unwrap_or_default(),
            profile.null_count.to_string(),
            describe_histogram(profile.histogram),
        ]);
    }
    table.render()
}

fn describe_histogram(histogram: Option<&ColumnHistogram>) -> String {
    match histogram {
        Some(ColumnHistogram::Binned(histogram)) => histogram
            .labels
            .iter()
            .zip(&histogram.counts)
            .map(|(label, count)| format!("[{label}]={count}"))
            .collect::<Vec<_>>()
            .join(" "),
        Some(ColumnHistogram::Unsupported { column_type }) => {
            format!("n/a ({column_type})")
        }
        None => String::new(),
    }
}

/// First `limit` rows in column order.
pub fn render_preview(state: &WranglerState, limit: usize) -> String {
    let mut table = TextTable::new(state.column_order().iter().cloned());
    for row in state.table().rows().iter().take(limit) {
        table.push_row(
            state
                .column_order()
                .iter()
                .map(|column| row.get(column).map(|v| v.as_text()).unwrap_or_default())
                .collect(),
        );
    }
    table.render()
}

pub fn render_history(state: &WranglerState) -> String {
    let mut table = TextTable::new(["#", "id", "operation", "payload"]).align(0, Align::Right);
    for (idx, entry) in state.history().entries().iter().enumerate() {
        table.push_row(vec![
            (idx + 1).to_string(),
            entry.id().to_string(),
            entry.kind().to_string(),
            entry.payload().to_string(),
        ]);
    }
    table.render()
}
