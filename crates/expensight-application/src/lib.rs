//! Application layer for the ExpenSight client.
//!
//! Use cases that coordinate the core domain with the infrastructure
//! implementations: the session store, the expense book (cache owner), and
//! the reconciliation/upload coordinators. All dependencies are injected
//! as `Arc<dyn Trait>`.

pub mod dashboard;
pub mod expense_book;
pub mod reconciliation;
pub mod session_store;
pub mod upload;

#[cfg(test)]
mod test_support;

pub use dashboard::DashboardService;
pub use expense_book::ExpenseBook;
pub use reconciliation::ReconciliationCoordinator;
pub use session_store::SessionStore;
pub use upload::UploadCoordinator;
