//! HTTP implementation of the remote authority contract.
//!
//! Wraps a `reqwest::Client` with an installable bearer credential and maps
//! transport and status failures into the core's [`ApiError`]. Server error
//! bodies carry a JSON `detail` field; it is extracted so callers can
//! classify failures by message as well as by status.

use expensight_core::api::{AuthorityClient, UploadOutcome};
use expensight_core::dashboard::{DashboardStats, TrendsData};
use expensight_core::error::ApiError;
use expensight_core::expense::{
    ExpenseRecord, NewExpense, ReceiptRef, ReconciliationHistoryEntry, ReconciliationResult,
};
use expensight_core::user::UserProfile;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
// Uploads wait on the authority's OCR pipeline.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed `AuthorityClient`.
///
/// The bearer credential lives behind a `RwLock` so one shared client can
/// be used by the session store and the coordinators concurrently; the
/// session store installs and clears it as the session changes.
pub struct HttpAuthorityClient {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    base_currency: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsUpdateRequest<'a> {
    base_currency: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReconcileRequest<'a> {
    expense_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversion_currency: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReconcileResponse {
    expense: ExpenseRecord,
    #[serde(default)]
    fx_rate: Option<f64>,
    #[serde(default)]
    conversion_currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    reconciliation_history: Vec<ReconciliationHistoryEntry>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    expense: ExpenseRecord,
    receipt: ReceiptRef,
}

impl HttpAuthorityClient {
    /// Creates a client against the given base URL (including the API
    /// version prefix, e.g. `https://host/v1`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Attaches the installed bearer credential, if any.
    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = self.token.read().unwrap().as_deref() {
            request.header("Authorization", format!("Bearer {}", token))
        } else {
            request
        }
    }

    /// Turns a non-success response into an `ApiError::Status`, pulling the
    /// FastAPI-style `detail` message out of the body when present.
    async fn status_error(response: Response) -> ApiError {
        let code = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
            .unwrap_or(body);
        ApiError::Status { code, message }
    }

    /// Sends a request and decodes a JSON success payload.
    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        if !response.status().is_success() {
            let err = Self::status_error(response).await;
            tracing::debug!("[HttpAuthority] Request failed: {}", err);
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl AuthorityClient for HttpAuthorityClient {
    fn install_token(&self, token: &str) {
        *self.token.write().unwrap() = Some(token.to_string());
    }

    fn clear_token(&self) {
        *self.token.write().unwrap() = None;
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let request = self
            .client
            .post(self.url("auth/login"))
            .json(&LoginRequest { email, password })
            .timeout(REQUEST_TIMEOUT);
        let response: LoginResponse = self.send_json(request).await?;
        Ok(response.access_token)
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        base_currency: &str,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url("auth/register"))
            .json(&RegisterRequest {
                email,
                password,
                base_currency,
            })
            .timeout(REQUEST_TIMEOUT);
        let _: serde_json::Value = self.send_json(request).await?;
        Ok(())
    }

    async fn profile(&self) -> Result<UserProfile, ApiError> {
        let request = self.auth_request(
            self.client
                .get(self.url("user/profile/"))
                .timeout(REQUEST_TIMEOUT),
        );
        self.send_json(request).await
    }

    async fn update_base_currency(&self, base_currency: &str) -> Result<String, ApiError> {
        let request = self.auth_request(
            self.client
                .patch(self.url("user/profile/settings/update/"))
                .json(&SettingsUpdateRequest { base_currency })
                .timeout(REQUEST_TIMEOUT),
        );
        let response: MessageResponse = self.send_json(request).await?;
        Ok(response.message)
    }

    async fn list_expenses(&self, limit: Option<u32>) -> Result<Vec<ExpenseRecord>, ApiError> {
        let mut request = self.client.get(self.url("expense/")).timeout(REQUEST_TIMEOUT);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        self.send_json(self.auth_request(request)).await
    }

    async fn create_expense(&self, expense: &NewExpense) -> Result<ExpenseRecord, ApiError> {
        let request = self.auth_request(
            self.client
                .post(self.url("expense/"))
                .json(expense)
                .timeout(REQUEST_TIMEOUT),
        );
        self.send_json(request).await
    }

    async fn upload_receipt(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<UploadOutcome, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let request = self.auth_request(
            self.client
                .post(self.url("receipt/upload"))
                .multipart(form)
                .timeout(UPLOAD_TIMEOUT),
        );
        let response: UploadResponse = self.send_json(request).await?;
        Ok(UploadOutcome {
            expense: response.expense,
            receipt: response.receipt,
        })
    }

    async fn reconcile(
        &self,
        expense_id: i64,
        target_currency: Option<&str>,
    ) -> Result<ReconciliationResult, ApiError> {
        let request = self.auth_request(
            self.client
                .post(self.url("reconcile/"))
                .json(&ReconcileRequest {
                    expense_id,
                    conversion_currency: target_currency,
                })
                .timeout(REQUEST_TIMEOUT),
        );
        let response: ReconcileResponse = self.send_json(request).await?;

        let fx_rate = response
            .fx_rate
            .ok_or_else(|| ApiError::decode("reconcile response missing fxRate"))?;
        let conversion_currency = response
            .conversion_currency
            .ok_or_else(|| ApiError::decode("reconcile response missing conversionCurrency"))?;

        Ok(ReconciliationResult {
            expense: response.expense,
            fx_rate,
            conversion_currency,
        })
    }

    async fn reconciliation_history(
        &self,
    ) -> Result<Vec<ReconciliationHistoryEntry>, ApiError> {
        let request = self.auth_request(
            self.client
                .get(self.url("reconcile/history"))
                .timeout(REQUEST_TIMEOUT),
        );
        let response: HistoryResponse = self.send_json(request).await?;
        Ok(response.reconciliation_history)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let request = self.auth_request(
            self.client
                .get(self.url("dashboard/stats"))
                .timeout(REQUEST_TIMEOUT),
        );
        self.send_json(request).await
    }

    async fn expense_trends(&self) -> Result<TrendsData, ApiError> {
        let request = self.auth_request(
            self.client
                .get(self.url("dashboard/trends"))
                .timeout(REQUEST_TIMEOUT),
        );
        self.send_json(request).await
    }
}
