//! Client configuration: account credentials, timeouts, cache location, endpoints.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToyotaError};

/// Default per-call HTTP deadline.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const DEFAULT_AUTHENTICATE_URL: &str = "https://b2c-login.toyota-europe.com/json/realms/root/realms/tme/authenticate?authIndexType=service&authIndexValue=oneapp";
const DEFAULT_AUTHORIZE_URL: &str = "https://b2c-login.toyota-europe.com/oauth2/realms/root/realms/tme/authorize?client_id=oneapp&scope=openid+profile+write&response_type=code&redirect_uri=com.toyota.oneapp:/oauth2Callback&code_challenge=plain&code_challenge_method=plain";
const DEFAULT_ACCESS_TOKEN_URL: &str =
    "https://b2c-login.toyota-europe.com/oauth2/realms/root/realms/tme/access_token";
const DEFAULT_API_BASE_URL: &str = "https://ctpa-oneapi.tceu-ctp-prd.toyotaconnectedeurope.io";

/// Vendor URLs. Defaults point at the production service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub authenticate_url: String,
    pub authorize_url: String,
    pub access_token_url: String,
    pub api_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authenticate_url: DEFAULT_AUTHENTICATE_URL.to_string(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            access_token_url: DEFAULT_ACCESS_TOKEN_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

/// Options recognized by the client.
///
/// # Example
/// ```
/// use mytoyota::config::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .username("driver@example.com")
///     .password("secret")
///     .timeout_seconds(30)
///     .build();
/// assert_eq!(config.timeout().as_secs(), 30);
/// ```
#[derive(Clone, Builder, Serialize, Deserialize)]
pub struct ClientConfig {
    #[builder(into)]
    pub username: String,
    #[builder(into)]
    pub password: String,
    #[builder(default = DEFAULT_TIMEOUT_SECS)]
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Credential cache file. `None` uses [`crate::auth::FileTokenStore::default_path`].
    #[builder(into)]
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
    #[builder(default)]
    #[serde(default)]
    pub endpoints: Endpoints,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("cache_path", &self.cache_path)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

impl ClientConfig {
    /// Per-HTTP-call deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| ToyotaError::Configuration(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ToyotaError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(ToyotaError::Configuration("username is required".into()));
        }
        if self.password.is_empty() {
            return Err(ToyotaError::Configuration("password is required".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(ToyotaError::Configuration(
                "timeout_seconds must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
