//! Owner of the live credential: freshness checks, refresh, re-authentication.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::backend::{AuthBackend, TokenGrant};
use super::credential::{ActiveToken, Credential, TokenState};
use super::store::TokenStore;
use crate::error::{Result, ToyotaError};

/// Keeps one valid credential per account and hides the refresh/login decision.
///
/// All transitions happen under a single async mutex, so concurrent callers
/// that find the token expired share one network exchange. After a grant
/// arrives, the in-memory update and the cache write complete without
/// yielding, so a cancelled caller cannot lose a freshly issued token.
pub struct TokenManager {
    username: String,
    password: String,
    backend: Arc<dyn AuthBackend>,
    store: Arc<dyn TokenStore>,
    state: Mutex<TokenState>,
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    /// Create a manager, adopting any cached credential for `username` verbatim.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        backend: Arc<dyn AuthBackend>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        let username = username.into();
        let cached = store.load(&username);
        if cached.is_some() {
            debug!("Adopted cached credential");
        }
        Self {
            state: Mutex::new(TokenState::adopt(cached, Utc::now())),
            username,
            password: password.into(),
            backend,
            store,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Make sure a usable access token is held, refreshing or logging in as needed.
    pub async fn ensure_valid(&self) -> Result<()> {
        self.active_token().await.map(|_| ())
    }

    /// Access token and account uuid of the held credential.
    ///
    /// Only meaningful after [`Self::ensure_valid`] succeeded; otherwise an
    /// [`ToyotaError::Internal`] is returned.
    pub async fn current_token(&self) -> Result<ActiveToken> {
        let state = self.state.lock().await;
        state
            .usable_at(Utc::now())
            .map(ActiveToken::from)
            .ok_or_else(|| {
                ToyotaError::Internal("current_token called without a valid credential".into())
            })
    }

    /// Snapshot of the lifecycle state.
    pub async fn state(&self) -> TokenState {
        self.state.lock().await.clone()
    }

    /// Ensure validity and snapshot the token in one step.
    pub async fn active_token(&self) -> Result<ActiveToken> {
        let mut state = self.state.lock().await;
        if let Some(credential) = state.usable_at(Utc::now()) {
            return Ok(ActiveToken::from(credential));
        }

        let refresh_token = state
            .credential()
            .filter(|c| c.has_refresh_token())
            .map(|c| c.refresh_token.clone());
        let grant = self.obtain_grant(refresh_token).await?;

        let credential = Credential::from_grant(&self.username, grant, Utc::now())?;
        let token = ActiveToken::from(&credential);
        if let Err(err) = self.store.save(&credential) {
            warn!(error = %err, "Failed to persist credential cache");
        }
        *state = TokenState::Live(credential);
        Ok(token)
    }

    /// Mark the held access token as rejected by the server.
    ///
    /// No-op when the held token differs from `rejected_access_token`, i.e.
    /// another task already replaced it.
    pub async fn invalidate(&self, rejected_access_token: &str) {
        let mut state = self.state.lock().await;
        if let TokenState::Live(credential) = &*state {
            if credential.access_token == rejected_access_token {
                debug!("Access token rejected, marking credential as expiring");
                *state = TokenState::Expiring(credential.clone());
            }
        }
    }

    async fn obtain_grant(&self, refresh_token: Option<String>) -> Result<TokenGrant> {
        if let Some(refresh_token) = refresh_token {
            debug!("Refreshing access token");
            match self.backend.refresh(&refresh_token).await {
                Ok(grant) => return Ok(grant),
                Err(err) => {
                    warn!(error = %err, "Token refresh failed, falling back to full login");
                }
            }
        }
        info!("Performing full login");
        self.backend
            .authenticate(&self.username, &self.password)
            .await
    }
}
