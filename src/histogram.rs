//! Fixed five-bin histograms over a column's numeric proxy.
//!
//! String columns are summarised by value length, numeric columns by their parsed value. Missing
//! values never reach a bin, so `counts` always sums to the column's non-null count. Boolean
//! columns have no numeric proxy and are reported as [`WranglerError::UnsupportedType`].

use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

use crate::{data::Table, data::Value, error::WranglerError, inference::ColumnType};

pub const HISTOGRAM_BINS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    pub counts: Vec<usize>,
    pub labels: Vec<String>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Histogram slot kept for every column so the metadata maps share one key set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ColumnHistogram {
    Binned(Histogram),
    Unsupported { column_type: ColumnType },
}

impl ColumnHistogram {
    pub fn binned(&self) -> Option<&Histogram> {
        match self {
            ColumnHistogram::Binned(histogram) => Some(histogram),
            ColumnHistogram::Unsupported { .. } => None,
        }
    }
}

/// Buckets `column` into [`HISTOGRAM_BINS`] equal-width bins according to `column_type`.
pub fn bucket(
    table: &Table,
    column: &str,
    column_type: ColumnType,
) -> Result<Histogram, WranglerError> {
    numeric_proxy(table, column, column_type)
        .map(|proxy| bin_values(&proxy))
        .ok_or(WranglerError::UnsupportedType(column_type))
}

/// Histogram slot for the metadata maps; types without a numeric proxy are `Unsupported`.
pub fn column_histogram(table: &Table, column: &str, column_type: ColumnType) -> ColumnHistogram {
    match numeric_proxy(table, column, column_type) {
        Some(proxy) => ColumnHistogram::Binned(bin_values(&proxy)),
        None => ColumnHistogram::Unsupported { column_type },
    }
}

fn numeric_proxy(table: &Table, column: &str, column_type: ColumnType) -> Option<Vec<f64>> {
    let proxy = match column_type {
        ColumnType::String => table
            .column_values(column)
            .filter(|value| !value.is_missing())
            .map(|value| value.as_text().chars().count() as f64)
            .collect(),
        ColumnType::Int => table
            .column_values(column)
            .filter_map(integer_proxy)
            .collect(),
        ColumnType::Float => table
            .column_values(column)
            .filter_map(float_proxy)
            .collect(),
        ColumnType::Boolean => return None,
    };
    Some(proxy)
}

fn integer_proxy(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) if f.is_finite() => Some(f.trunc()),
        Value::String(s) => s.trim().parse::<i64>().ok().map(|i| i as f64),
        _ => None,
    }
}

fn float_proxy(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) if f.is_finite() => Some(*f),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn bin_values(values: &[f64]) -> Histogram {
    let (min, max) = match values.iter().copied().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => (0.0, 0.0),
        MinMaxResult::OneElement(value) => (value, value),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    // A zero-width extent collapses into the first of unit-width bins.
    let span = max - min;
    let width = if span > 0.0 {
        span / HISTOGRAM_BINS as f64
    } else {
        1.0
    };

    let mut counts = vec![0usize; HISTOGRAM_BINS];
    for value in values {
        let offset = ((value - min) / width).floor();
        let bin = if offset.is_finite() && offset > 0.0 {
            (offset as usize).min(HISTOGRAM_BINS - 1)
        } else {
            0
        };
        counts[bin] += 1;
    }

    let labels = (0..HISTOGRAM_BINS)
        .map(|idx| {
            let lower = min + width * idx as f64;
            let upper = if idx + 1 == HISTOGRAM_BINS && span > 0.0 {
                max
            } else {
                min + width * (idx + 1) as f64
            };
            format!("{} - {}", format_bound(lower), format_bound(upper))
        })
        .collect();

    Histogram { counts, labels }
}

fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let rendered = format!("{value:.4}");
        rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
