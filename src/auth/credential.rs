//! Authenticated identity and its lifecycle state.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::backend::TokenGrant;
use crate::error::{Result, ToyotaError};

/// The unit of authenticated identity, persisted by a [`super::TokenStore`].
///
/// Field order is the on-disk order.
///
/// # Example
/// ```
/// use chrono::{Duration, Utc};
/// use mytoyota::auth::Credential;
///
/// let credential = Credential {
///     access_token: "access".to_string(),
///     refresh_token: "refresh".to_string(),
///     uuid: "account-uuid".to_string(),
///     expiration: Utc::now() + Duration::hours(1),
///     username: "driver@example.com".to_string(),
/// };
/// assert!(credential.is_valid());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
    pub uuid: String,
    pub expiration: DateTime<Utc>,
    pub username: String,
}

impl Credential {
    /// Build a credential from a freshly issued grant. Expiry is `now + expires_in`.
    ///
    /// Fails with [`ToyotaError::Login`] when the expiry is not representable.
    pub fn from_grant(username: &str, grant: TokenGrant, now: DateTime<Utc>) -> Result<Self> {
        let expiration = now
            .checked_add_signed(grant.expires_in)
            .ok_or_else(|| ToyotaError::login("Token lifetime overflows the expiry timestamp"))?;
        Ok(Self {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            uuid: grant.uuid,
            expiration,
            username: username.to_string(),
        })
    }

    /// Valid iff the access token is non-empty and expiry is strictly in the future.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty() && self.expiration > now
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    pub fn has_refresh_token(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    /// Time left before expiry, negative once expired.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.expiration - now
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .field("uuid", &"***")
            .field("expiration", &self.expiration)
            .field("username", &self.username)
            .finish()
    }
}

/// Where the held credential sits in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    /// Nothing cached; a full login is required.
    Absent,
    /// A credential exists but its access token is expired or was rejected.
    Expiring(Credential),
    /// Access token believed usable.
    Live(Credential),
}

impl TokenState {
    /// Adopt a credential as-is, classifying it by its expiry.
    pub fn adopt(credential: Option<Credential>, now: DateTime<Utc>) -> Self {
        match credential {
            None => Self::Absent,
            Some(c) if c.is_valid_at(now) => Self::Live(c),
            Some(c) => Self::Expiring(c),
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        match self {
            Self::Absent => None,
            Self::Expiring(c) | Self::Live(c) => Some(c),
        }
    }

    /// The live credential, if it is still within its lifetime at `now`.
    pub fn usable_at(&self, now: DateTime<Utc>) -> Option<&Credential> {
        match self {
            Self::Live(c) if c.is_valid_at(now) => Some(c),
            _ => None,
        }
    }
}

/// Snapshot of what a request needs to authenticate itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ActiveToken {
    pub access_token: String,
    pub uuid: String,
}

impl From<&Credential> for ActiveToken {
    fn from(credential: &Credential) -> Self {
        Self {
            access_token: credential.access_token.clone(),
            uuid: credential.uuid.clone(),
        }
    }
}

impl fmt::Debug for ActiveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveToken")
            .field("access_token", &"***")
            .field("uuid", &"***")
            .finish()
    }
}
