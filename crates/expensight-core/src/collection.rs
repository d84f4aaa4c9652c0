//! In-memory expense collection cache.
//!
//! The collection mirrors the authority's expense list for the current
//! session: an ordered sequence of records with an id index so merges and
//! appends stay at predictable cost as the list grows. After the initial
//! load there are exactly three mutation paths - `replace_all`, `append`,
//! and `apply_reconciliation` - and each replaces a whole record or the
//! whole collection, never individual fields.

use crate::error::{CollectionError, ConsistencyWarning};
use crate::expense::{ExpenseRecord, ReconciliationResult};
use std::collections::HashMap;

/// Ordered, id-unique set of expense records scoped to one session.
///
/// Insertion order reflects the order the authority returned records in,
/// until the next `replace_all`. The index maps each id to its position in
/// the order vector; the two structures are kept consistent by construction.
#[derive(Debug, Default)]
pub struct ExpenseCollection {
    records: Vec<ExpenseRecord>,
    index: HashMap<i64, usize>,
}

impl ExpenseCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire collection with the authoritative list, in the
    /// order received.
    ///
    /// If the authority ever returned a duplicate id, the later record wins
    /// its slot in the index while keeping the first position in the order,
    /// preserving the at-most-one-record-per-id invariant.
    pub fn replace_all(&mut self, records: Vec<ExpenseRecord>) {
        self.records.clear();
        self.index.clear();
        for record in records {
            match self.index.get(&record.id) {
                Some(&pos) => self.records[pos] = record,
                None => {
                    self.index.insert(record.id, self.records.len());
                    self.records.push(record);
                }
            }
        }
    }

    /// Inserts a newly created record at the end of the collection.
    ///
    /// Ids are server-assigned and unique, so an id that is already cached
    /// is a logic error and is returned instead of merged.
    pub fn append(&mut self, record: ExpenseRecord) -> Result<(), CollectionError> {
        if self.index.contains_key(&record.id) {
            return Err(CollectionError::DuplicateId(record.id));
        }
        self.index.insert(record.id, self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Merges a reconciliation result back into the collection.
    ///
    /// Replaces the cached record whose id matches `result.expense.id` in
    /// place, preserving collection order. If no record matches, the
    /// collection is left unchanged and a [`ConsistencyWarning`] is returned:
    /// the local cache was stale relative to the authority.
    pub fn apply_reconciliation(
        &mut self,
        result: &ReconciliationResult,
    ) -> Result<(), ConsistencyWarning> {
        let id = result.expense.id;
        match self.index.get(&id) {
            Some(&pos) => {
                self.records[pos] = result.expense.clone();
                Ok(())
            }
            None => Err(ConsistencyWarning { expense_id: id }),
        }
    }

    /// Looks up a record by id.
    pub fn get(&self, id: i64) -> Option<&ExpenseRecord> {
        self.index.get(&id).map(|&pos| &self.records[pos])
    }

    /// The records in collection order.
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record, e.g. on logout.
    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }
}
