use thiserror::Error;

use crate::inference::ColumnType;

/// Failures surfaced by the wrangling engine.
///
/// Absent columns and name collisions are not errors: the reducer treats them as no-ops.
#[derive(Debug, Error)]
pub enum WranglerError {
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),

    #[error("invalid payload for operation `{kind}`")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("histogram bucketing is not supported for {0} columns")]
    UnsupportedType(ColumnType),

    #[error("wrangler state is inconsistent: {0}")]
    Inconsistent(String),
}
