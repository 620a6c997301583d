//! Column type inference.
//!
//! Every non-missing value in a column is classified as an integer, float, boolean literal, or
//! plain string. The column takes the most specific type every observed value satisfies:
//! integers also satisfy float, so a mix of the two resolves to [`ColumnType::Float`]. Anything
//! else falls back to [`ColumnType::String`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{Table, Value};

const BOOLEAN_TOKENS: &[&str] = &["true", "false", "t", "f", "yes", "no", "y", "n"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Int,
    Float,
    Boolean,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueClass {
    Integer,
    Float,
    Boolean,
    Text,
}

fn classify(value: &Value) -> ValueClass {
    match value {
        Value::Int(_) => ValueClass::Integer,
        Value::Float(_) => ValueClass::Float,
        Value::Boolean(_) => ValueClass::Boolean,
        Value::String(s) => classify_text(s),
        // Callers skip missing values before classifying.
        Value::Null => ValueClass::Text,
    }
}

fn classify_text(raw: &str) -> ValueClass {
    let trimmed = raw.trim();
    if trimmed.parse::<i64>().is_ok() {
        ValueClass::Integer
    } else if trimmed.parse::<f64>().is_ok_and(f64::is_finite) {
        ValueClass::Float
    } else if is_boolean_literal(trimmed) {
        ValueClass::Boolean
    } else {
        ValueClass::Text
    }
}

pub fn is_boolean_literal(value: &str) -> bool {
    let lowered = value.to_ascii_lowercase();
    BOOLEAN_TOKENS.contains(&lowered.as_str())
}

#[derive(Debug, Clone, Default)]
struct TypeCandidate {
    non_empty: usize,
    integer_matches: usize,
    float_matches: usize,
    boolean_matches: usize,
}

impl TypeCandidate {
    fn observe(&mut self, value: &Value) {
        if value.is_missing() {
            return;
        }
        self.non_empty += 1;
        match classify(value) {
            ValueClass::Integer => {
                self.integer_matches += 1;
                self.float_matches += 1;
            }
            ValueClass::Float => self.float_matches += 1,
            ValueClass::Boolean => self.boolean_matches += 1,
            ValueClass::Text => {}
        }
    }

    fn decide(&self) -> ColumnType {
        if self.non_empty == 0 {
            ColumnType::String
        } else if self.integer_matches == self.non_empty {
            ColumnType::Int
        } else if self.float_matches == self.non_empty {
            ColumnType::Float
        } else if self.boolean_matches == self.non_empty {
            ColumnType::Boolean
        } else {
            ColumnType::String
        }
    }
}

/// Infers the type of `column` across every row of `table`. Never fails; a column with no
/// usable values is a string column.
pub fn infer_column_type(table: &Table, column: &str) -> ColumnType {
    let mut candidate = TypeCandidate::default();
    for value in table.column_values(column) {
        candidate.observe(value);
    }
    candidate.decide()
}
