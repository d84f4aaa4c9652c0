//! Dashboard aggregates.
//!
//! Thin fetch layer for the dashboard endpoints; the payloads are opaque to
//! the core and go straight to presentation.

use expensight_core::api::AuthorityClient;
use expensight_core::dashboard::{DashboardStats, TrendsData};
use expensight_core::error::FetchError;
use std::sync::Arc;

/// Fetches aggregate display data from the authority.
pub struct DashboardService {
    api: Arc<dyn AuthorityClient>,
}

impl DashboardService {
    pub fn new(api: Arc<dyn AuthorityClient>) -> Self {
        Self { api }
    }

    /// Aggregated counters (`GET dashboard/stats`).
    pub async fn stats(&self) -> Result<DashboardStats, FetchError> {
        self.api.dashboard_stats().await.map_err(FetchError::from)
    }

    /// Six-month expense trend (`GET dashboard/trends`).
    pub async fn trends(&self) -> Result<TrendsData, FetchError> {
        self.api.expense_trends().await.map_err(FetchError::from)
    }
}
