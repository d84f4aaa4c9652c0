//! Remote authority contract.
//!
//! Defines the interface the rest of the client uses to talk to the
//! ExpenSight service. The infrastructure crate provides the HTTP
//! implementation; tests substitute in-process fakes.

use crate::dashboard::{DashboardStats, TrendsData};
use crate::error::ApiError;
use crate::expense::{
    ExpenseRecord, NewExpense, ReceiptRef, ReconciliationHistoryEntry, ReconciliationResult,
};
use crate::user::UserProfile;

/// Outcome of a successful receipt upload: the derived expense plus the
/// stored receipt reference.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub expense: ExpenseRecord,
    pub receipt: ReceiptRef,
}

/// Client-side contract for the ExpenSight remote authority.
///
/// Every protected call carries the installed bearer credential. The
/// credential is installed by the session store after `login`/`restore`
/// and removed on `logout` or failed revalidation; implementations hold it
/// behind interior mutability so the client can be shared.
///
/// All methods map transport and status failures into [`ApiError`];
/// classification into the per-operation error taxonomy is the caller's
/// concern.
#[async_trait::async_trait]
pub trait AuthorityClient: Send + Sync {
    /// Installs the bearer credential used for protected calls.
    fn install_token(&self, token: &str);

    /// Removes the installed credential.
    fn clear_token(&self);

    /// Exchanges credentials for an access token (`POST auth/login`).
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError>;

    /// Creates an account (`POST auth/register`). Does not log in.
    async fn register(
        &self,
        email: &str,
        password: &str,
        base_currency: &str,
    ) -> Result<(), ApiError>;

    /// Fetches the authenticated account's profile (`GET user/profile/`).
    async fn profile(&self) -> Result<UserProfile, ApiError>;

    /// Updates the account's base currency
    /// (`PATCH user/profile/settings/update/`). Returns the confirmation
    /// message.
    async fn update_base_currency(&self, base_currency: &str) -> Result<String, ApiError>;

    /// Lists the account's expenses in server order (`GET expense/`).
    async fn list_expenses(&self, limit: Option<u32>) -> Result<Vec<ExpenseRecord>, ApiError>;

    /// Creates a manual expense (`POST expense/`).
    async fn create_expense(&self, expense: &NewExpense) -> Result<ExpenseRecord, ApiError>;

    /// Uploads a receipt for OCR-derived expense creation
    /// (`POST receipt/upload`, multipart).
    async fn upload_receipt(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<UploadOutcome, ApiError>;

    /// Reconciles one expense against a historical FX rate
    /// (`POST reconcile/`). An absent target currency means the account's
    /// base currency.
    async fn reconcile(
        &self,
        expense_id: i64,
        target_currency: Option<&str>,
    ) -> Result<ReconciliationResult, ApiError>;

    /// Fetches the reconciliation audit trail (`GET reconcile/history`).
    async fn reconciliation_history(
        &self,
    ) -> Result<Vec<ReconciliationHistoryEntry>, ApiError>;

    /// Fetches dashboard counters (`GET dashboard/stats`).
    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError>;

    /// Fetches the six-month expense trend (`GET dashboard/trends`).
    async fn expense_trends(&self) -> Result<TrendsData, ApiError>;
}
