//! Session store use case.
//!
//! Owns the process-wide `Option<Session>` and the credential lifecycle
//! around it: restore at startup, login/register, logout, and profile
//! refresh. The store is the only writer of the persisted token and of the
//! credential installed on the authority client, so the three never
//! disagree for longer than one operation.

use expensight_core::api::AuthorityClient;
use expensight_core::error::{AuthError, FetchError};
use expensight_core::session::Session;
use expensight_core::token::TokenStore;
use expensight_core::user::UserProfile;
use std::sync::{Arc, RwLock};

/// Process-wide authenticated-session holder.
///
/// Injected into the route guard and the coordinators rather than read from
/// ambient scope; all dependencies come in as `Arc<dyn Trait>` so tests can
/// substitute in-process fakes.
pub struct SessionStore {
    api: Arc<dyn AuthorityClient>,
    tokens: Arc<dyn TokenStore>,
    session: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn AuthorityClient>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            tokens,
            session: RwLock::new(None),
        }
    }

    /// The current session, if any.
    pub fn current(&self) -> Option<Session> {
        self.session.read().unwrap().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().unwrap().is_some()
    }

    /// Restores the session from the persisted token at process start.
    ///
    /// If a token is persisted it is installed on the client and validated
    /// by fetching the account profile. On any failure (network, 401,
    /// malformed token) the persisted token is cleared and the session
    /// stays absent. Callers must await this before running any protected
    /// operation - it gates initial paint.
    pub async fn restore(&self) -> Option<Session> {
        let token = match self.tokens.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::debug!("[SessionStore] No persisted token; starting unauthenticated");
                return None;
            }
            Err(e) => {
                tracing::warn!("[SessionStore] Failed to read persisted token: {}", e);
                self.discard_credentials();
                return None;
            }
        };

        self.api.install_token(&token);
        match self.api.profile().await {
            Ok(profile) => {
                let session = Session::new(profile, token);
                *self.session.write().unwrap() = Some(session.clone());
                tracing::info!("[SessionStore] Restored session for {}", session.email());
                Some(session)
            }
            Err(e) => {
                tracing::info!("[SessionStore] Persisted token failed validation: {}", e);
                self.discard_credentials();
                None
            }
        }
    }

    /// Exchanges credentials for a session.
    ///
    /// Persists the token, installs it on the client, and fetches the
    /// profile. If the profile fetch fails the token is discarded again so
    /// the operation applies fully or not at all.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let token = self
            .api
            .login(email, password)
            .await
            .map_err(AuthError::from_login)?;

        if let Err(e) = self.tokens.save(&token) {
            return Err(AuthError::Network(format!(
                "failed to persist access token: {e}"
            )));
        }
        self.api.install_token(&token);

        match self.api.profile().await {
            Ok(profile) => {
                let session = Session::new(profile, token);
                *self.session.write().unwrap() = Some(session.clone());
                tracing::info!("[SessionStore] Logged in as {}", session.email());
                Ok(session)
            }
            Err(e) => {
                self.discard_credentials();
                Err(AuthError::from_login(e))
            }
        }
    }

    /// Creates an account. Does not establish a session; the caller must
    /// log in afterwards.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        base_currency: &str,
    ) -> Result<(), AuthError> {
        self.api
            .register(email, password, base_currency)
            .await
            .map_err(AuthError::from_register)
    }

    /// Clears the session unconditionally and synchronously. Never fails:
    /// in-memory state is dropped first, and a token-file removal error is
    /// logged rather than surfaced.
    pub fn logout(&self) {
        *self.session.write().unwrap() = None;
        self.api.clear_token();
        if let Err(e) = self.tokens.clear() {
            tracing::warn!("[SessionStore] Failed to remove persisted token: {}", e);
        }
        tracing::info!("[SessionStore] Logged out");
    }

    /// Re-fetches the account profile into the current session.
    ///
    /// Used whenever a view needs authoritative account state, e.g. after a
    /// settings update. The previous profile is kept on failure.
    pub async fn refresh_profile(&self) -> Result<UserProfile, FetchError> {
        if !self.is_authenticated() {
            return Err(FetchError::ServerError {
                code: 401,
                message: "no active session".to_string(),
            });
        }
        let profile = self.api.profile().await.map_err(FetchError::from)?;
        if let Some(session) = self.session.write().unwrap().as_mut() {
            session.profile = profile.clone();
        }
        Ok(profile)
    }

    /// Updates the account's base currency and refreshes the profile so
    /// the in-memory session reflects the authority. Returns the
    /// confirmation message.
    pub async fn update_base_currency(&self, base_currency: &str) -> Result<String, FetchError> {
        let message = self
            .api
            .update_base_currency(base_currency)
            .await
            .map_err(FetchError::from)?;
        self.refresh_profile().await?;
        Ok(message)
    }

    /// Drops the persisted token and the installed credential, leaving the
    /// in-memory session absent.
    fn discard_credentials(&self) {
        *self.session.write().unwrap() = None;
        self.api.clear_token();
        if let Err(e) = self.tokens.clear() {
            tracing::warn!("[SessionStore] Failed to clear persisted token: {}", e);
        }
    }
}
