//! Append-only record of applied operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::operation::{Operation, OperationKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    id: Uuid,
    operation: Operation,
    applied_at: DateTime<Utc>,
}

impl HistoryEntry {
    fn new(operation: Operation) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation,
            applied_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> OperationKind {
        self.operation.kind()
    }

    pub fn payload(&self) -> serde_json::Value {
        self.operation.payload()
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn applied_at(&self) -> DateTime<Utc> {
        self.applied_at
    }
}

/// Entries can only be appended, and only by the reducer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub(crate) fn record(&mut self, operation: Operation) -> &HistoryEntry {
        self.entries.push(HistoryEntry::new(operation));
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Applied operations in order, suitable for [`crate::state::WranglerState::replay`].
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.entries.iter().map(HistoryEntry::operation)
    }
}
