//! Operation kinds and payload shapes exchanged between user intent and the reducer.
//!
//! On the wire an operation is a `kind` string plus a JSON `payload` object. [`Operation`] is the
//! typed form; [`Operation::from_wire`] converts and reports unknown kinds as
//! [`WranglerError::UnknownOperation`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::WranglerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Drop,
    Rename,
    Split,
    Merge,
    Uppercase,
    Lowercase,
    Titlecase,
    Substring,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Drop => "drop",
            OperationKind::Rename => "rename",
            OperationKind::Split => "split",
            OperationKind::Merge => "merge",
            OperationKind::Uppercase => "uppercase",
            OperationKind::Lowercase => "lowercase",
            OperationKind::Titlecase => "titlecase",
            OperationKind::Substring => "substring",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = WranglerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "drop" => OperationKind::Drop,
            "rename" => OperationKind::Rename,
            "split" => OperationKind::Split,
            "merge" => OperationKind::Merge,
            "uppercase" => OperationKind::Uppercase,
            "lowercase" => OperationKind::Lowercase,
            "titlecase" => OperationKind::Titlecase,
            "substring" => OperationKind::Substring,
            _ => return Err(WranglerError::UnknownOperation(s.to_string())),
        };
        Ok(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPayload {
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePayload {
    pub column: String,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPayload {
    pub column: String,
    pub delimiter: String,
    pub first_split: String,
    pub second_split: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergePayload {
    pub column: String,
    pub merge_with: String,
    pub join_by: String,
    pub merged_column_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstringPayload {
    pub column: String,
    pub begin_index: i64,
    pub end_index: i64,
    pub column_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Operation {
    Drop(ColumnPayload),
    Rename(RenamePayload),
    Split(SplitPayload),
    Merge(MergePayload),
    Uppercase(ColumnPayload),
    Lowercase(ColumnPayload),
    Titlecase(ColumnPayload),
    Substring(SubstringPayload),
}

impl Operation {
    pub fn drop(column: impl Into<String>) -> Self {
        Operation::Drop(ColumnPayload {
            column: column.into(),
        })
    }

    pub fn rename(column: impl Into<String>, new_name: impl Into<String>) -> Self {
        Operation::Rename(RenamePayload {
            column: column.into(),
            new_name: new_name.into(),
        })
    }

    pub fn split(
        delimiter: impl Into<String>,
        column: impl Into<String>,
        first_split: impl Into<String>,
        second_split: impl Into<String>,
    ) -> Self {
        Operation::Split(SplitPayload {
            column: column.into(),
            delimiter: delimiter.into(),
            first_split: first_split.into(),
            second_split: second_split.into(),
        })
    }

    pub fn merge(
        column: impl Into<String>,
        merge_with: impl Into<String>,
        join_by: impl Into<String>,
        merged_column_name: impl Into<String>,
    ) -> Self {
        Operation::Merge(MergePayload {
            column: column.into(),
            merge_with: merge_with.into(),
            join_by: join_by.into(),
            merged_column_name: merged_column_name.into(),
        })
    }

    pub fn uppercase(column: impl Into<String>) -> Self {
        Operation::Uppercase(ColumnPayload {
            column: column.into(),
        })
    }

    pub fn lowercase(column: impl Into<String>) -> Self {
        Operation::Lowercase(ColumnPayload {
            column: column.into(),
        })
    }

    pub fn titlecase(column: impl Into<String>) -> Self {
        Operation::Titlecase(ColumnPayload {
            column: column.into(),
        })
    }

    pub fn substring(
        column: impl Into<String>,
        begin_index: i64,
        end_index: i64,
        column_name: impl Into<String>,
    ) -> Self {
        Operation::Substring(SubstringPayload {
            column: column.into(),
            begin_index,
            end_index,
            column_name: column_name.into(),
        })
    }

    /// Builds an operation from its wire kind and JSON payload.
    pub fn from_wire(kind: &str, payload: serde_json::Value) -> Result<Self, WranglerError> {
        let parsed = OperationKind::from_str(kind)?;
        let invalid = |source| WranglerError::InvalidPayload {
            kind: parsed.as_str().to_string(),
            source,
        };
        let operation = match parsed {
            OperationKind::Drop => {
                Operation::Drop(serde_json::from_value(payload).map_err(invalid)?)
            }
            OperationKind::Rename => {
                Operation::Rename(serde_json::from_value(payload).map_err(invalid)?)
            }
            OperationKind::Split => {
                Operation::Split(serde_json::from_value(payload).map_err(invalid)?)
            }
            OperationKind::Merge => {
                Operation::Merge(serde_json::from_value(payload).map_err(invalid)?)
            }
            OperationKind::Uppercase => {
                Operation::Uppercase(serde_json::from_value(payload).map_err(invalid)?)
            }
            OperationKind::Lowercase => {
                Operation::Lowercase(serde_json::from_value(payload).map_err(invalid)?)
            }
            OperationKind::Titlecase => {
                Operation::Titlecase(serde_json::from_value(payload).map_err(invalid)?)
            }
            OperationKind::Substring => {
                Operation::Substring(serde_json::from_value(payload).map_err(invalid)?)
            }
        };
        Ok(operation)
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Drop(_) => OperationKind::Drop,
            Operation::Rename(_) => OperationKind::Rename,
            Operation::Split(_) => OperationKind::Split,
            Operation::Merge(_) => OperationKind::Merge,
            Operation::Uppercase(_) => OperationKind::Uppercase,
            Operation::Lowercase(_) => OperationKind::Lowercase,
            Operation::Titlecase(_) => OperationKind::Titlecase,
            Operation::Substring(_) => OperationKind::Substring,
        }
    }

    /// The column the operation reads from.
    pub fn source_column(&self) -> &str {
        match self {
            Operation::Drop(p)
            | Operation::Uppercase(p)
            | Operation::Lowercase(p)
            | Operation::Titlecase(p) => &p.column,
            Operation::Rename(p) => &p.column,
            Operation::Split(p) => &p.column,
            Operation::Merge(p) => &p.column,
            Operation::Substring(p) => &p.column,
        }
    }

    /// The payload as it appears on the wire.
    pub fn payload(&self) -> serde_json::Value {
        let value = match self {
            Operation::Drop(p)
            | Operation::Uppercase(p)
            | Operation::Lowercase(p)
            | Operation::Titlecase(p) => serde_json::to_value(p),
            Operation::Rename(p) => serde_json::to_value(p),
            Operation::Split(p) => serde_json::to_value(p),
            Operation::Merge(p) => serde_json::to_value(p),
            Operation::Substring(p) => serde_json::to_value(p),
        };
        // Payloads are plain structs of strings and integers.
        value.unwrap_or(serde_json::Value::Null)
    }
}

/// Loosely typed operation as read from a script, converted with [`Operation::from_wire`].
#[derive(Debug, Clone, Deserialize)]
pub struct WireOperation {
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl TryFrom<WireOperation> for Operation {
    type Error = WranglerError;

    fn try_from(wire: WireOperation) -> Result<Self, Self::Error> {
        Operation::from_wire(&wire.kind, wire.payload)
    }
}
