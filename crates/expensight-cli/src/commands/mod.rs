//! Command implementations and shared application wiring.

pub mod auth;
pub mod dashboard;
pub mod expenses;

use anyhow::{Result, bail};
use expensight_application::{
    DashboardService, ExpenseBook, ReconciliationCoordinator, SessionStore, UploadCoordinator,
};
use expensight_core::guard::{self, RouteDecision};
use expensight_infrastructure::{
    ClientConfig, ExpensightPaths, FileTokenStore, HttpAuthorityClient,
};
use std::sync::Arc;

/// Fully wired client stack.
pub struct App {
    pub session: SessionStore,
    pub book: ExpenseBook,
    pub reconciliation: ReconciliationCoordinator,
    pub uploads: UploadCoordinator,
    pub dashboard: DashboardService,
}

impl App {
    /// Builds the stack and restores the session from the persisted token.
    ///
    /// `restore` fully resolves (success or failure) before any command
    /// runs, so no protected operation ever sees a half-validated session.
    pub async fn bootstrap() -> Result<Self> {
        let config = ClientConfig::load();
        let token_file = ExpensightPaths::token_file()
            .map_err(|e| anyhow::anyhow!("cannot resolve token path: {e}"))?;

        let api: Arc<HttpAuthorityClient> =
            Arc::new(HttpAuthorityClient::new(config.api_base_url.clone()));
        let tokens = Arc::new(FileTokenStore::new(token_file));

        let session = SessionStore::new(api.clone(), tokens);
        session.restore().await;

        let book = ExpenseBook::new(api.clone());
        let reconciliation = ReconciliationCoordinator::new(api.clone(), book.collection());
        let uploads = UploadCoordinator::new(api.clone(), book.collection());
        let dashboard = DashboardService::new(api);

        Ok(Self {
            session,
            book,
            reconciliation,
            uploads,
            dashboard,
        })
    }

    /// Applies the route guard to the command's pseudo-path.
    pub fn ensure_allowed(&self, path: &str) -> Result<()> {
        let session = self.session.current();
        match guard::guard(session.as_ref(), path) {
            RouteDecision::Allow(_) => Ok(()),
            RouteDecision::Redirect(target) if target == guard::ENTRY_PATH => {
                bail!("not logged in; run `expensight login <email> <password>` first")
            }
            RouteDecision::Redirect(_) => {
                bail!("already logged in; run `expensight logout` to switch accounts")
            }
        }
    }
}
