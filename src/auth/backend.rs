//! Pluggable login flow used by [`super::TokenManager`].

use std::fmt;

use async_trait::async_trait;
use chrono::Duration;

use crate::error::Result;

/// Tokens issued by the vendor's token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    pub id_token: String,
    /// `uuid` claim read from `id_token`.
    pub uuid: String,
    pub expires_in: Duration,
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

/// Obtains token grants, either interactively from a password or from a refresh token.
///
/// Implement this to substitute the vendor flow, e.g. in tests.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Full login. Fails with [`crate::ToyotaError::Login`] when the vendor rejects it.
    async fn authenticate(&self, username: &str, password: &str) -> Result<TokenGrant>;

    /// Exchange a refresh token for a new grant.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant>;
}
