//! Error types for the ExpenSight client.
//!
//! The infrastructure layer produces transport-level [`ApiError`]s; the
//! application layer maps them into the per-operation taxonomy
//! ([`AuthError`], [`FetchError`], [`UploadError`], [`ReconciliationError`])
//! so callers get a compile-time-checked branch per failure kind instead of
//! an exception funnel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport-level failure from the remote authority.
///
/// This is the only error the `AuthorityClient` implementations produce.
/// It carries enough information (HTTP status, server detail message) for
/// the application layer to classify the failure per operation.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ApiError {
    /// The authority answered with a non-success HTTP status.
    #[error("authority returned HTTP {code}: {message}")]
    Status { code: u16, message: String },

    /// The request never completed (connect, timeout, DNS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The authority answered but the payload could not be decoded.
    #[error("failed to decode authority response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Creates a `Status` error.
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: message.into(),
        }
    }

    /// Creates a `Network` error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a `Decode` error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Returns the HTTP status code, if the authority answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The server-provided detail message, or the transport error text.
    pub fn message(&self) -> &str {
        match self {
            Self::Status { message, .. } => message,
            Self::Network(message) | Self::Decode(message) => message,
        }
    }
}

/// Failures of the session lifecycle (`restore`, `login`, `register`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The authority rejected the email/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration hit an already-registered email.
    #[error("email is already registered")]
    Conflict,

    /// The authority rejected the input shape (e.g. malformed currency code).
    #[error("invalid input: {0}")]
    Validation(String),

    /// The request never produced an answer.
    #[error("network error: {0}")]
    Network(String),
}

impl AuthError {
    /// Classifies a transport failure from `POST auth/login`.
    ///
    /// The authority answers 400/401 for a bad email/password pair.
    pub fn from_login(err: ApiError) -> Self {
        match err {
            ApiError::Status { code, .. } if code == 400 || code == 401 => {
                Self::InvalidCredentials
            }
            ApiError::Status { message, .. } => Self::Validation(message),
            ApiError::Network(message) | ApiError::Decode(message) => Self::Network(message),
        }
    }

    /// Classifies a transport failure from `POST auth/register`.
    ///
    /// The authority answers 400 with an "already registered" detail for a
    /// taken email and 422 for malformed input.
    pub fn from_register(err: ApiError) -> Self {
        match err {
            ApiError::Status { code: 400, message } if message.contains("already registered") => {
                Self::Conflict
            }
            ApiError::Status { code: 409, .. } => Self::Conflict,
            ApiError::Status { message, .. } => Self::Validation(message),
            ApiError::Network(message) | ApiError::Decode(message) => Self::Network(message),
        }
    }

    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict)
    }
}

/// Failures of read operations (`load`, profile fetch, dashboard).
///
/// Read failures never modify previously loaded state; callers surface them
/// for a user-visible retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced an answer.
    #[error("network error: {0}")]
    Network(String),

    /// The authority answered with a failure status.
    #[error("authority error (HTTP {code}): {message}")]
    ServerError { code: u16, message: String },
}

impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { code, message } => Self::ServerError { code, message },
            ApiError::Network(message) | ApiError::Decode(message) => Self::Network(message),
        }
    }
}

/// Failures of `POST receipt/upload`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// The file type is not accepted (client-side whitelist).
    #[error("unsupported file: {0}")]
    Validation(String),

    /// The authority could not extract structured data from the receipt.
    #[error("receipt processing failed: {0}")]
    ProcessingFailed(String),

    /// The request never produced an answer.
    #[error("network error: {0}")]
    Network(String),
}

impl From<ApiError> for UploadError {
    fn from(err: ApiError) -> Self {
        match err {
            // 4xx from the authority means the file made it there but could
            // not be turned into an expense; 5xx covers OCR pipeline errors.
            ApiError::Status { message, .. } => Self::ProcessingFailed(message),
            ApiError::Network(message) | ApiError::Decode(message) => Self::Network(message),
        }
    }
}

/// Failures of `POST reconcile/`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationError {
    /// The authority does not know the expense id.
    #[error("expense {0} not found")]
    NotFound(i64),

    /// The authority rejected the request shape (bad currency code, id <= 0).
    #[error("invalid reconciliation request: {0}")]
    Validation(String),

    /// The request never produced an answer.
    #[error("network error: {0}")]
    Network(String),
}

impl ReconciliationError {
    /// Classifies a transport failure for the given expense id.
    pub fn classify(expense_id: i64, err: ApiError) -> Self {
        match err {
            ApiError::Status { code: 404, .. } => Self::NotFound(expense_id),
            ApiError::Status { message, .. } => Self::Validation(message),
            ApiError::Network(message) | ApiError::Decode(message) => Self::Network(message),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Non-fatal signal that the local cache and the authority diverged:
/// a merge arrived for an expense id the cache does not hold.
///
/// Must be observable (logged) wherever it occurs; it is never an abort.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("reconciliation result for expense {expense_id} has no cached record to merge into")]
pub struct ConsistencyWarning {
    pub expense_id: i64,
}

/// Logic errors of the expense collection itself.
///
/// Ids are server-assigned and unique, so a duplicate `append` indicates a
/// client bug and is reported rather than silently merged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("expense {0} is already cached")]
    DuplicateId(i64),
}
