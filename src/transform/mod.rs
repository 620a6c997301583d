//! Pure column transforms.
//!
//! Every transform reads a [`Table`] and returns a fresh one, or `None` when the edit has no
//! applicable target: the source column is absent, or a target name would overwrite an existing
//! column. Metadata is never touched here; the reducer in [`crate::state`] owns that.

pub mod string_ops;

use std::borrow::Cow;

use crate::{
    data::{Table, Value},
    operation::Operation,
};

/// Case conversions applied by [`change_case`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    Upper,
    Lower,
    Title,
}

impl CaseStyle {
    pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        match self {
            CaseStyle::Upper => string_ops::uppercase(input),
            CaseStyle::Lower => string_ops::lowercase(input),
            CaseStyle::Title => string_ops::titlecase(input),
        }
    }
}

/// Runs the transform named by `operation`.
pub fn apply_operation(table: &Table, operation: &Operation) -> Option<Table> {
    match operation {
        Operation::Drop(p) => drop_column(table, &p.column),
        Operation::Rename(p) => rename_column(table, &p.column, &p.new_name),
        Operation::Split(p) => split_column(
            table,
            &p.delimiter,
            &p.column,
            &p.first_split,
            &p.second_split,
        ),
        Operation::Merge(p) => merge_columns(
            table,
            &p.column,
            &p.merge_with,
            &p.join_by,
            &p.merged_column_name,
        ),
        Operation::Uppercase(p) => uppercase_column(table, &p.column),
        Operation::Lowercase(p) => lowercase_column(table, &p.column),
        Operation::Titlecase(p) => titlecase_column(table, &p.column),
        Operation::Substring(p) => substring_column(
            table,
            &p.column,
            p.begin_index,
            p.end_index,
            &p.column_name,
        ),
    }
}

pub fn rename_column(table: &Table, old_name: &str, new_name: &str) -> Option<Table> {
    if old_name == new_name || !table.has_column(old_name) || table.has_column(new_name) {
        return None;
    }
    Some(table.map_rows(|row| {
        if let Some(value) = row.remove(old_name) {
            row.insert(new_name.to_string(), value);
        }
    }))
}

pub fn drop_column(table: &Table, column: &str) -> Option<Table> {
    if !table.has_column(column) {
        return None;
    }
    Some(table.map_rows(|row| {
        row.remove(column);
    }))
}

/// Splits `column` at the first `delimiter` into `first` and `second`, keeping the source.
pub fn split_column(
    table: &Table,
    delimiter: &str,
    column: &str,
    first: &str,
    second: &str,
) -> Option<Table> {
    if !table.has_column(column)
        || first == second
        || table.has_column(first)
        || table.has_column(second)
    {
        return None;
    }
    Some(table.map_rows(|row| {
        let text = row.get(column).map(Value::as_text).unwrap_or_default();
        let (head, tail) = string_ops::split_first(&text, delimiter);
        let (head, tail) = (head.into_owned(), tail.into_owned());
        row.insert(first.to_string(), Value::String(head));
        row.insert(second.to_string(), Value::String(tail));
    }))
}

/// Concatenates `column`, `join`, and `merge_with` into `new_name`. Both sources are kept.
pub fn merge_columns(
    table: &Table,
    column: &str,
    merge_with: &str,
    join: &str,
    new_name: &str,
) -> Option<Table> {
    if !table.has_column(column) || !table.has_column(merge_with) || table.has_column(new_name) {
        return None;
    }
    Some(table.map_rows(|row| {
        let left = row.get(column).map(Value::as_text).unwrap_or_default();
        let right = row.get(merge_with).map(Value::as_text).unwrap_or_default();
        row.insert(
            new_name.to_string(),
            Value::String(format!("{left}{join}{right}")),
        );
    }))
}

/// Rewrites `column` in the given case. Non-string values become strings; `Null` stays `Null`.
pub fn change_case(table: &Table, column: &str, style: CaseStyle) -> Option<Table> {
    if !table.has_column(column) {
        return None;
    }
    Some(table.map_rows(|row| {
        if let Some(value) = row.get_mut(column)
            && !matches!(value, Value::Null)
        {
            let text = value.as_text();
            let cased = style.apply(&text).into_owned();
            *value = Value::String(cased);
        }
    }))
}

pub fn uppercase_column(table: &Table, column: &str) -> Option<Table> {
    change_case(table, column, CaseStyle::Upper)
}

pub fn lowercase_column(table: &Table, column: &str) -> Option<Table> {
    change_case(table, column, CaseStyle::Lower)
}

pub fn titlecase_column(table: &Table, column: &str) -> Option<Table> {
    change_case(table, column, CaseStyle::Title)
}

/// Copies characters `[begin, end)` of `column` into `new_name`. Negative indices count as 0 and
/// indices past the end clamp to each value's length.
pub fn substring_column(
    table: &Table,
    column: &str,
    begin: i64,
    end: i64,
    new_name: &str,
) -> Option<Table> {
    if !table.has_column(column) || table.has_column(new_name) {
        return None;
    }
    let (begin, end) = (clamp_index(begin), clamp_index(end));
    Some(table.map_rows(|row| {
        let text = row.get(column).map(Value::as_text).unwrap_or_default();
        let sliced = string_ops::substring(&text, begin, end).into_owned();
        row.insert(new_name.to_string(), Value::String(sliced));
    }))
}

fn clamp_index(index: i64) -> usize {
    usize::try_from(index.max(0)).unwrap_or(usize::MAX)
}
