//! Vendor login: callback challenge loop, authorization code, token exchange.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, COOKIE, LOCATION};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::backend::{AuthBackend, TokenGrant};
use super::jwt;
use crate::api::redact::redact;
use crate::config::Endpoints;
use crate::error::{Result, ToyotaError};

/// Upper bound on challenge/response round trips.
pub const MAX_CHALLENGE_ROUNDS: usize = 10;

const CLIENT_ID: &str = "oneapp";
const REDIRECT_URI: &str = "com.toyota.oneapp:/oauth2Callback";
const CODE_VERIFIER: &str = "plain";
/// `oneapp:oneapp`, the public client's fixed credentials.
const BASIC_AUTH: &str = "basic b25lYXBwOm9uZWFwcA==";
const SESSION_COOKIE: &str = "iPlanetDirectoryPro";
/// Ten years; anything longer is treated as a malformed grant.
const MAX_EXPIRES_IN_SECS: f64 = 10.0 * 365.0 * 24.0 * 3600.0;

/// Drives the vendor's three-stage login and the refresh-token exchange.
///
/// Redirects are never followed: the authorize step reads the `Location`
/// header of its 302 response.
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use mytoyota::auth::{AuthBackend, Authenticator};
/// use mytoyota::config::Endpoints;
///
/// # async fn example() -> mytoyota::Result<()> {
/// let auth = Authenticator::new(Endpoints::default(), Duration::from_secs(60))?;
/// let grant = auth.authenticate("driver@example.com", "secret").await?;
/// println!("token valid for {}s", grant.expires_in.num_seconds());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Authenticator {
    client: reqwest::Client,
    endpoints: Endpoints,
    timeout: Duration,
}

impl Authenticator {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            endpoints,
            timeout,
        })
    }

    /// Stage A: post callback answers until the server hands out a `tokenId`.
    async fn challenge(&self, username: &str, password: &str) -> Result<String> {
        let mut data = Value::Object(serde_json::Map::new());
        for round in 1..=MAX_CHALLENGE_ROUNDS {
            fill_callbacks(&mut data, username, password);
            debug!(round, body = %loggable_challenge(&data), "POST authenticate");
            let resp = self
                .client
                .post(&self.endpoints.authenticate_url)
                .json(&data)
                .send()
                .await
                .map_err(|e| ToyotaError::transport(e, self.timeout))?;
            let status = resp.status();
            let body = resp
                .text()
                .await
                .map_err(|e| ToyotaError::transport(e, self.timeout))?;
            debug!(round, status = status.as_u16(), body = %redact(&body), "authenticate response");
            if status != StatusCode::OK {
                return Err(ToyotaError::login(format!(
                    "Authentication challenge failed with status {status}"
                )));
            }
            data = serde_json::from_str(&body).map_err(|e| {
                ToyotaError::login(format!("Authentication challenge returned invalid JSON: {e}"))
            })?;
            if let Some(token_id) = data.get("tokenId") {
                return token_id
                    .as_str()
                    .map(ToString::to_string)
                    .ok_or_else(|| ToyotaError::login("tokenId is not a string"));
            }
        }
        Err(ToyotaError::login(format!(
            "No tokenId after {MAX_CHALLENGE_ROUNDS} challenge rounds"
        )))
    }

    /// Stage B: trade the session token for an authorization code.
    async fn authorize(&self, token_id: &str) -> Result<String> {
        debug!("GET authorize");
        let resp = self
            .client
            .get(&self.endpoints.authorize_url)
            .header(COOKIE, format!("{SESSION_COOKIE}={token_id}"))
            .send()
            .await
            .map_err(|e| ToyotaError::transport(e, self.timeout))?;
        let status = resp.status();
        debug!(status = status.as_u16(), "authorize response");
        if status != StatusCode::FOUND {
            return Err(ToyotaError::login(format!(
                "Authorization failed with status {status}"
            )));
        }
        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ToyotaError::login("Authorization redirect has no Location header"))?;
        extract_code(&self.endpoints.authorize_url, location)
    }

    /// Stage C and refresh: post a form to the token endpoint.
    async fn exchange(&self, form: &[(&str, &str)]) -> Result<TokenGrant> {
        debug!(grant_type = form_value(form, "grant_type"), "POST access_token");
        let resp = self
            .client
            .post(&self.endpoints.access_token_url)
            .header(AUTHORIZATION, BASIC_AUTH)
            .form(form)
            .send()
            .await
            .map_err(|e| ToyotaError::transport(e, self.timeout))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ToyotaError::transport(e, self.timeout))?;
        debug!(status = status.as_u16(), body = %redact(&body), "access_token response");
        if status != StatusCode::OK {
            return Err(ToyotaError::login(format!(
                "Token request failed with status {status}"
            )));
        }
        parse_token_response(&body)
    }
}

#[async_trait]
impl AuthBackend for Authenticator {
    async fn authenticate(&self, username: &str, password: &str) -> Result<TokenGrant> {
        info!("Authenticating with username and password");
        let token_id = self.challenge(username, password).await?;
        let code = self.authorize(&token_id).await?;
        self.exchange(&[
            ("client_id", CLIENT_ID),
            ("code", &code),
            ("redirect_uri", REDIRECT_URI),
            ("grant_type", "authorization_code"),
            ("code_verifier", CODE_VERIFIER),
        ])
        .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant> {
        self.exchange(&[
            ("client_id", CLIENT_ID),
            ("redirect_uri", REDIRECT_URI),
            ("grant_type", "refresh_token"),
            ("code_verifier", CODE_VERIFIER),
            ("refresh_token", refresh_token),
        ])
        .await
    }
}

/// Answer `NameCallback("User Name")` and `PasswordCallback` prompts in place.
fn fill_callbacks(data: &mut Value, username: &str, password: &str) {
    let Some(callbacks) = data.get_mut("callbacks").and_then(Value::as_array_mut) else {
        return;
    };
    for callback in callbacks {
        let answer = match callback.get("type").and_then(Value::as_str) {
            Some("NameCallback")
                if callback.pointer("/output/0/value").and_then(Value::as_str)
                    == Some("User Name") =>
            {
                username
            }
            Some("PasswordCallback") => password,
            _ => continue,
        };
        if let Some(slot) = callback.pointer_mut("/input/0/value") {
            *slot = Value::String(answer.to_string());
        }
    }
}

/// Redacted rendering of a challenge body with `PasswordCallback` answers masked.
fn loggable_challenge(data: &Value) -> String {
    let mut masked = data.clone();
    if let Some(callbacks) = masked.get_mut("callbacks").and_then(Value::as_array_mut) {
        for callback in callbacks
            .iter_mut()
            .filter(|c| c.get("type").and_then(Value::as_str) == Some("PasswordCallback"))
        {
            let Some(inputs) = callback.get_mut("input").and_then(Value::as_array_mut) else {
                continue;
            };
            for slot in inputs.iter_mut().filter_map(|input| input.get_mut("value")) {
                *slot = Value::String("***".to_string());
            }
        }
    }
    redact(&masked.to_string())
}

fn extract_code(authorize_url: &str, location: &str) -> Result<String> {
    let url = Url::parse(location)
        .or_else(|_| Url::parse(authorize_url).and_then(|base| base.join(location)))
        .map_err(|e| ToyotaError::login(format!("Invalid authorization redirect: {e}")))?;
    url.query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ToyotaError::login("Authorization redirect carries no code"))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    id_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<f64>,
}

fn parse_token_response(body: &str) -> Result<TokenGrant> {
    let payload: TokenResponse = serde_json::from_str(body)
        .map_err(|e| ToyotaError::login(format!("Token response is not valid JSON: {e}")))?;
    let (Some(access_token), Some(id_token), Some(refresh_token), Some(expires_in)) = (
        payload.access_token,
        payload.id_token,
        payload.refresh_token,
        payload.expires_in,
    ) else {
        return Err(ToyotaError::login("Token response is missing required fields"));
    };
    let expires_in = lifetime(expires_in)?;
    let uuid = jwt::uuid_claim(&id_token)?;
    Ok(TokenGrant {
        access_token,
        refresh_token,
        id_token,
        uuid,
        expires_in,
    })
}

/// `expires_in` seconds as a duration; must be finite and within `0..=MAX_EXPIRES_IN_SECS`.
fn lifetime(expires_in: f64) -> Result<chrono::Duration> {
    if !expires_in.is_finite() || !(0.0..=MAX_EXPIRES_IN_SECS).contains(&expires_in) {
        return Err(ToyotaError::login(format!(
            "Token response has an out-of-range expires_in: {expires_in}"
        )));
    }
    chrono::Duration::try_milliseconds((expires_in * 1000.0).round() as i64)
        .ok_or_else(|| ToyotaError::login("Token response expires_in overflows"))
}

fn form_value<'a>(form: &[(&str, &'a str)], key: &str) -> &'a str {
    form.iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or_default()
}
