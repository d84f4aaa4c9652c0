//! In-process test doubles for the core contracts.
//!
//! Unit tests program a [`MockAuthority`] with the responses they need and
//! assert on the calls it observed; no HTTP is involved.

use expensight_core::api::{AuthorityClient, UploadOutcome};
use expensight_core::dashboard::{DashboardStats, TrendsData};
use expensight_core::error::ApiError;
use expensight_core::expense::{
    ExpenseRecord, ExpenseStatus, NewExpense, ReconciliationHistoryEntry, ReconciliationResult,
};
use expensight_core::token::{TokenStore, TokenStoreError};
use expensight_core::user::UserProfile;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Builds a pending expense record for tests.
pub fn pending_expense(id: i64, amount: f64) -> ExpenseRecord {
    ExpenseRecord {
        id,
        amount,
        currency: "EUR".to_string(),
        category: "Travel".to_string(),
        date: chrono::Utc::now(),
        status: ExpenseStatus::Pending,
        converted_amount: None,
        conversion_currency: None,
        receipt: None,
    }
}

/// Builds a reconciliation result for the given expense id.
pub fn reconciled_result(id: i64, amount: f64, converted: f64) -> ReconciliationResult {
    let mut expense = pending_expense(id, amount);
    expense.status = ExpenseStatus::Reconciled;
    expense.converted_amount = Some(converted);
    expense.conversion_currency = Some("USD".to_string());
    ReconciliationResult {
        expense,
        fx_rate: 1.18,
        conversion_currency: "USD".to_string(),
    }
}

pub fn profile(email: &str) -> UserProfile {
    UserProfile {
        id: Some(1),
        email: email.to_string(),
        base_currency: Some("USD".to_string()),
    }
}

fn unprogrammed<T>() -> Result<T, ApiError> {
    Err(ApiError::network("mock: response not programmed"))
}

/// Programmable `AuthorityClient` double.
///
/// Each operation returns the programmed response (or a network error when
/// none was set) and counts its invocations so tests can assert which calls
/// reached the authority.
#[derive(Default)]
pub struct MockAuthority {
    pub installed_token: Mutex<Option<String>>,
    pub login_response: Mutex<Option<Result<String, ApiError>>>,
    pub register_response: Mutex<Option<Result<(), ApiError>>>,
    pub profile_response: Mutex<Option<Result<UserProfile, ApiError>>>,
    pub settings_response: Mutex<Option<Result<String, ApiError>>>,
    pub list_response: Mutex<Option<Result<Vec<ExpenseRecord>, ApiError>>>,
    pub create_response: Mutex<Option<Result<ExpenseRecord, ApiError>>>,
    pub upload_response: Mutex<Option<Result<UploadOutcome, ApiError>>>,
    pub reconcile_response: Mutex<Option<Result<ReconciliationResult, ApiError>>>,
    pub history_response: Mutex<Option<Result<Vec<ReconciliationHistoryEntry>, ApiError>>>,
    pub stats_response: Mutex<Option<Result<DashboardStats, ApiError>>>,
    pub trends_response: Mutex<Option<Result<TrendsData, ApiError>>>,
    pub upload_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
}

impl MockAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_login(&self, response: Result<String, ApiError>) {
        *self.login_response.lock().unwrap() = Some(response);
    }

    pub fn set_register(&self, response: Result<(), ApiError>) {
        *self.register_response.lock().unwrap() = Some(response);
    }

    pub fn set_profile(&self, response: Result<UserProfile, ApiError>) {
        *self.profile_response.lock().unwrap() = Some(response);
    }

    pub fn set_settings(&self, response: Result<String, ApiError>) {
        *self.settings_response.lock().unwrap() = Some(response);
    }

    pub fn set_list(&self, response: Result<Vec<ExpenseRecord>, ApiError>) {
        *self.list_response.lock().unwrap() = Some(response);
    }

    pub fn set_create(&self, response: Result<ExpenseRecord, ApiError>) {
        *self.create_response.lock().unwrap() = Some(response);
    }

    pub fn set_upload(&self, response: Result<UploadOutcome, ApiError>) {
        *self.upload_response.lock().unwrap() = Some(response);
    }

    pub fn set_reconcile(&self, response: Result<ReconciliationResult, ApiError>) {
        *self.reconcile_response.lock().unwrap() = Some(response);
    }

    pub fn set_history(&self, response: Result<Vec<ReconciliationHistoryEntry>, ApiError>) {
        *self.history_response.lock().unwrap() = Some(response);
    }

    pub fn installed_token(&self) -> Option<String> {
        self.installed_token.lock().unwrap().clone()
    }

    fn take_or_unprogrammed<T: Clone>(slot: &Mutex<Option<Result<T, ApiError>>>) -> Result<T, ApiError> {
        slot.lock().unwrap().clone().unwrap_or_else(unprogrammed)
    }
}

#[async_trait::async_trait]
impl AuthorityClient for MockAuthority {
    fn install_token(&self, token: &str) {
        *self.installed_token.lock().unwrap() = Some(token.to_string());
    }

    fn clear_token(&self) {
        *self.installed_token.lock().unwrap() = None;
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<String, ApiError> {
        Self::take_or_unprogrammed(&self.login_response)
    }

    async fn register(
        &self,
        _email: &str,
        _password: &str,
        _base_currency: &str,
    ) -> Result<(), ApiError> {
        Self::take_or_unprogrammed(&self.register_response)
    }

    async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        Self::take_or_unprogrammed(&self.profile_response)
    }

    async fn update_base_currency(&self, _base_currency: &str) -> Result<String, ApiError> {
        Self::take_or_unprogrammed(&self.settings_response)
    }

    async fn list_expenses(&self, _limit: Option<u32>) -> Result<Vec<ExpenseRecord>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Self::take_or_unprogrammed(&self.list_response)
    }

    async fn create_expense(&self, _expense: &NewExpense) -> Result<ExpenseRecord, ApiError> {
        Self::take_or_unprogrammed(&self.create_response)
    }

    async fn upload_receipt(
        &self,
        _bytes: Vec<u8>,
        _file_name: &str,
    ) -> Result<UploadOutcome, ApiError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        Self::take_or_unprogrammed(&self.upload_response)
    }

    async fn reconcile(
        &self,
        _expense_id: i64,
        _target_currency: Option<&str>,
    ) -> Result<ReconciliationResult, ApiError> {
        Self::take_or_unprogrammed(&self.reconcile_response)
    }

    async fn reconciliation_history(
        &self,
    ) -> Result<Vec<ReconciliationHistoryEntry>, ApiError> {
        Self::take_or_unprogrammed(&self.history_response)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        Self::take_or_unprogrammed(&self.stats_response)
    }

    async fn expense_trends(&self) -> Result<TrendsData, ApiError> {
        Self::take_or_unprogrammed(&self.trends_response)
    }
}

/// In-memory `TokenStore` double with an optional failure switch for the
/// logout-never-fails path.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
    pub fail_clear: bool,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
            fail_clear: false,
        }
    }

    pub fn failing_clear() -> Self {
        Self {
            token: Mutex::new(Some("stuck".to_string())),
            fail_clear: true,
        }
    }

    pub fn current(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.token.lock().unwrap().clone())
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        if self.fail_clear {
            return Err(TokenStoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "clear refused",
            )));
        }
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}
