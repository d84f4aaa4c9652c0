//! Dashboard aggregate payloads.
//!
//! These shapes are opaque to the core: they are fetched from the authority
//! and handed straight to the presentation layer.

use serde::{Deserialize, Serialize};

/// Aggregated counters for the dashboard (`GET dashboard/stats`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_receipts: i64,
    pub converted: i64,
    pub pending: i64,
    pub this_month: i64,
}

/// One month's expense total (`GET dashboard/trends`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Month label, e.g. "Jan".
    pub name: String,
    pub total: f64,
}

/// Six-month expense trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendsData {
    pub data: Vec<TrendPoint>,
}
