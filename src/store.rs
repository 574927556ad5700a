//! Append-only, input-ordered collection of decoded records.

use crate::transaction::TransactionRecord;
use std::slice;

/// Holds every decoded record in the order its line was read.
///
/// # Invariants
///
/// - Records are only ever appended; nothing is removed or reordered
/// - Records rejected by the report's date check stay in the store
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    records: Vec<TransactionRecord>,
}

impl TransactionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        TransactionStore {
            records: Vec::new(),
        }
    }

    /// Adds a record after all previously stored ones.
    pub fn append(&mut self, record: TransactionRecord) {
        self.records.push(record);
    }

    /// Iterates records in insertion order. Can be called any number of times.
    pub fn iter(&self) -> slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a TransactionStore {
    type Item = &'a TransactionRecord;
    type IntoIter = slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
