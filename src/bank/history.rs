use serde::Serialize;

use super::record::TransactionRecord;

/// Append-only log of the transactions applied to one account, oldest first.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct History {
    entries: Vec<TransactionRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only `transaction::apply` calls this.
    pub(crate) fn append(&mut self, record: TransactionRecord) -> &TransactionRecord {
        self.entries.push(record);
        &self.entries[self.entries.len() - 1]
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TransactionRecord> {
        self.entries.last()
    }
}
