//! Expense book use case.
//!
//! Owns the shared expense collection cache and drives the list/create
//! operations against the authority. The cache handle is shared with the
//! reconciliation and upload coordinators, which merge their results into
//! it; the book itself only replaces the collection wholesale (`load`) or
//! appends freshly created records.

use expensight_core::api::AuthorityClient;
use expensight_core::collection::ExpenseCollection;
use expensight_core::error::FetchError;
use expensight_core::expense::{ExpenseRecord, NewExpense};
use std::sync::{Arc, RwLock};

/// Cache owner and entry point for expense list/create operations.
///
/// Overlapping `load` calls are last-write-wins: the collection reflects
/// whichever response resolves last, which may not be the most recently
/// issued request. Callers needing strict ordering must serialize loads
/// themselves.
pub struct ExpenseBook {
    api: Arc<dyn AuthorityClient>,
    collection: Arc<RwLock<ExpenseCollection>>,
}

impl ExpenseBook {
    pub fn new(api: Arc<dyn AuthorityClient>) -> Self {
        Self {
            api,
            collection: Arc::new(RwLock::new(ExpenseCollection::new())),
        }
    }

    /// Handle to the shared cache, for the coordinators.
    pub fn collection(&self) -> Arc<RwLock<ExpenseCollection>> {
        Arc::clone(&self.collection)
    }

    /// Replaces the collection with the authoritative list.
    ///
    /// On failure the previous collection is left intact - there is no
    /// partial replacement. Returns the number of records loaded.
    pub async fn load(&self, limit: Option<u32>) -> Result<usize, FetchError> {
        let records = self
            .api
            .list_expenses(limit)
            .await
            .map_err(FetchError::from)?;
        let count = records.len();
        self.collection.write().unwrap().replace_all(records);
        tracing::debug!("[ExpenseBook] Loaded {} expenses", count);
        Ok(count)
    }

    /// Creates a manual expense at the authority and appends it to the
    /// cache.
    pub async fn add_manual(&self, expense: &NewExpense) -> Result<ExpenseRecord, FetchError> {
        let record = self
            .api
            .create_expense(expense)
            .await
            .map_err(FetchError::from)?;
        if let Err(e) = self.collection.write().unwrap().append(record.clone()) {
            // Server-assigned ids are unique; a duplicate means the cache
            // and authority diverged through a client bug.
            tracing::error!("[ExpenseBook] Refusing duplicate append: {}", e);
        }
        Ok(record)
    }

    /// Cloned records in collection order, for rendering.
    pub fn snapshot(&self) -> Vec<ExpenseRecord> {
        self.collection.read().unwrap().records().to_vec()
    }

    /// Drops all cached records (e.g. on logout).
    pub fn clear(&self) {
        self.collection.write().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockAuthority, pending_expense};
    use expensight_core::error::ApiError;

    #[tokio::test]
    async fn load_replaces_the_collection_in_server_order() {
        let api = Arc::new(MockAuthority::new());
        api.set_list(Ok(vec![pending_expense(5, 1.0), pending_expense(2, 2.0)]));
        let book = ExpenseBook::new(api);

        assert_eq!(book.load(None).await.unwrap(), 2);
        let ids: Vec<i64> = book.snapshot().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 2]);
    }

    #[tokio::test]
    async fn failed_load_keeps_the_previous_collection() {
        let api = Arc::new(MockAuthority::new());
        api.set_list(Ok(vec![pending_expense(1, 1.0)]));
        let book = ExpenseBook::new(api.clone());
        book.load(None).await.unwrap();

        api.set_list(Err(ApiError::status(503, "upstream down")));
        let err = book.load(None).await.unwrap_err();
        assert!(matches!(err, FetchError::ServerError { code: 503, .. }));
        assert_eq!(book.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn repeated_load_of_an_unchanged_list_is_idempotent() {
        let api = Arc::new(MockAuthority::new());
        api.set_list(Ok(vec![pending_expense(1, 1.0), pending_expense(2, 2.0)]));
        let book = ExpenseBook::new(api);

        book.load(None).await.unwrap();
        let first = book.snapshot();
        book.load(None).await.unwrap();
        assert_eq!(book.snapshot(), first);
    }

    #[tokio::test]
    async fn add_manual_appends_after_the_loaded_records() {
        let api = Arc::new(MockAuthority::new());
        api.set_list(Ok(vec![pending_expense(1, 1.0)]));
        api.set_create(Ok(pending_expense(9, 42.0)));
        let book = ExpenseBook::new(api);
        book.load(None).await.unwrap();

        let record = book.add_manual(&NewExpense {
            amount: 42.0,
            currency: "EUR".to_string(),
            category: "Food".to_string(),
            date: "2026-08-30".to_string(),
        })
        .await
        .unwrap();
        assert_eq!(record.id, 9);

        let ids: Vec<i64> = book.snapshot().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 9]);
    }

    #[tokio::test]
    async fn failed_create_leaves_the_cache_unchanged() {
        let api = Arc::new(MockAuthority::new());
        api.set_create(Err(ApiError::network("timed out")));
        let book = ExpenseBook::new(api);

        let err = book
            .add_manual(&NewExpense {
                amount: 1.0,
                currency: "EUR".to_string(),
                category: "Food".to_string(),
                date: "2026-08-30".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Network("timed out".to_string()));
        assert!(book.snapshot().is_empty());
    }
}
