//! Reconciliation coordinator.
//!
//! Drives a single-expense reconciliation against the authority and merges
//! the authoritative result back into the shared cache. Per expense the
//! states are PENDING -> in flight -> RECONCILED on success, or back to
//! PENDING on failure; nothing partial persists because the cached record
//! is only touched once the authority has answered.

use expensight_core::api::AuthorityClient;
use expensight_core::collection::ExpenseCollection;
use expensight_core::error::{FetchError, ReconciliationError};
use expensight_core::expense::{ReconciliationHistoryEntry, ReconciliationResult};
use std::sync::{Arc, RwLock};

/// Coordinates reconciliation requests and cache merge-back.
///
/// Concurrent `reconcile` calls for the same expense id are not
/// deduplicated here: both will reach the authority and the last response
/// to resolve wins in the cache. Callers wanting stronger consistency must
/// serialize per id themselves.
pub struct ReconciliationCoordinator {
    api: Arc<dyn AuthorityClient>,
    collection: Arc<RwLock<ExpenseCollection>>,
}

impl ReconciliationCoordinator {
    pub fn new(
        api: Arc<dyn AuthorityClient>,
        collection: Arc<RwLock<ExpenseCollection>>,
    ) -> Self {
        Self { api, collection }
    }

    /// Reconciles one expense against a historical FX rate.
    ///
    /// An absent `target_currency` means the account's base currency. On
    /// success the authoritative record replaces the cached one; on failure
    /// the cached status is untouched so the expense never shows as
    /// reconciled without the authority agreeing. A result whose id is no
    /// longer cached is logged as a consistency warning and still counts as
    /// success, since the authority-side reconciliation did happen.
    pub async fn reconcile(
        &self,
        expense_id: i64,
        target_currency: Option<&str>,
    ) -> Result<ReconciliationResult, ReconciliationError> {
        let result = self
            .api
            .reconcile(expense_id, target_currency)
            .await
            .map_err(|e| ReconciliationError::classify(expense_id, e))?;

        if let Err(warning) = self.collection.write().unwrap().apply_reconciliation(&result) {
            tracing::warn!("[Reconciliation] {}", warning);
        } else {
            tracing::debug!(
                "[Reconciliation] Expense {} reconciled at rate {}",
                expense_id,
                result.fx_rate
            );
        }
        Ok(result)
    }

    /// Fetches the reconciliation audit trail.
    pub async fn history(&self) -> Result<Vec<ReconciliationHistoryEntry>, FetchError> {
        self.api
            .reconciliation_history()
            .await
            .map_err(FetchError::from)
    }
}
