//! Account identity types.

use serde::{Deserialize, Serialize};

/// The authenticated account's profile as returned by `GET user/profile/`.
///
/// Owned by the session; refreshed by re-fetching from the authority
/// whenever authoritative account state is needed (e.g. after a settings
/// update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    pub email: String,
    /// Account-level default target currency for reconciliation.
    #[serde(default)]
    pub base_currency: Option<String>,
}
