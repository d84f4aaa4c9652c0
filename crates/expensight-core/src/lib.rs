//! Core domain layer for the ExpenSight client.
//!
//! Holds the domain model, the error taxonomy, the expense collection
//! cache, the route guard, and the traits the infrastructure layer
//! implements (`AuthorityClient`, `TokenStore`). This crate performs no
//! I/O.

pub mod api;
pub mod collection;
pub mod dashboard;
pub mod error;
pub mod expense;
pub mod guard;
pub mod session;
pub mod token;
pub mod user;

pub use api::{AuthorityClient, UploadOutcome};
pub use collection::ExpenseCollection;
pub use error::{
    ApiError, AuthError, CollectionError, ConsistencyWarning, FetchError, ReconciliationError,
    UploadError,
};
pub use expense::{
    ExpenseRecord, ExpenseStatus, NewExpense, ReceiptRef, ReconciliationHistoryEntry,
    ReconciliationResult,
};
pub use guard::{guard, RouteDecision};
pub use session::Session;
pub use token::{TokenStore, TokenStoreError};
pub use user::UserProfile;
