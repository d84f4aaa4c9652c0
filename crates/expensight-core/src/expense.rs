//! Expense domain types.
//!
//! Field names follow the authority's camelCase wire format so the same
//! types serve as both domain model and payload shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reconciliation state of an expense record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseStatus {
    /// Created but not yet converted into a target currency.
    Pending,
    /// Converted; `converted_amount`/`conversion_currency` are populated.
    Reconciled,
}

/// Reference to the receipt file an expense was derived from.
///
/// Upload responses echo only the filename and owning ids, so everything
/// except `filename` is optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRef {
    #[serde(default)]
    pub id: Option<i64>,
    pub filename: String,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// A single expense record as held by the remote authority.
///
/// Records are created by the authority (manual add or receipt upload) and
/// mutated only by reconciliation, which flips `status` to `Reconciled` and
/// populates the conversion fields. `id` is server-assigned, stable for the
/// record's lifetime, and the sole key used for cache merges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: i64,
    pub amount: f64,
    /// Three-letter currency code of the original amount.
    pub currency: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub status: ExpenseStatus,
    #[serde(default)]
    pub converted_amount: Option<f64>,
    #[serde(default)]
    pub conversion_currency: Option<String>,
    #[serde(default)]
    pub receipt: Option<ReceiptRef>,
}

impl ExpenseRecord {
    /// Whether this record has been reconciled.
    pub fn is_reconciled(&self) -> bool {
        self.status == ExpenseStatus::Reconciled
    }
}

/// Input for creating an expense manually (`POST expense/`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    pub currency: String,
    pub category: String,
    /// Transaction date in `YYYY-MM-DD` form, as the authority expects it.
    pub date: String,
}

/// Outcome of a single reconciliation request.
///
/// Transient: consumed once to merge `expense` back into the collection,
/// not retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    /// The expense as the authority sees it after reconciliation.
    pub expense: ExpenseRecord,
    pub fx_rate: f64,
    pub conversion_currency: String,
}

/// One row of the reconciliation audit trail (`GET reconcile/history`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationHistoryEntry {
    pub id: i64,
    pub converted_amount: f64,
    /// Currency the expense was recorded in.
    #[serde(default)]
    pub base_currency: Option<String>,
    #[serde(default)]
    pub conversion_currency: Option<String>,
    #[serde(default)]
    pub fx_rate: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub expense: ExpenseRecord,
}
