//! Session value type.

use crate::user::UserProfile;
use serde::{Deserialize, Serialize};

/// An authenticated session: a validated credential plus the identity it
/// was validated against.
///
/// Held as `Option<Session>` by the session store. The invariant is that a
/// `Session` only ever exists with both parts: the profile was fetched with
/// the token, so holding one implies the other was valid at validation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub profile: UserProfile,
    /// Opaque bearer credential issued by `POST auth/login`.
    pub token: String,
}

impl Session {
    pub fn new(profile: UserProfile, token: impl Into<String>) -> Self {
        Self {
            profile,
            token: token.into(),
        }
    }

    /// Email of the authenticated account.
    pub fn email(&self) -> &str {
        &self.profile.email
    }

    /// The account's default reconciliation target currency, if set.
    pub fn base_currency(&self) -> Option<&str> {
        self.profile.base_currency.as_deref()
    }
}
