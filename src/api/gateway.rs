//! Single chokepoint for vendor API calls: identity headers, timeouts,
//! outcome classification and the one-shot retry on 401.

use std::sync::Arc;
use std::time::Duration;

use bon::Builder;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use strum::{AsRefStr, Display, EnumString};
use tracing::debug;
use uuid::Uuid;

use super::redact::{redact, redact_headers};
use crate::auth::{ActiveToken, TokenManager};
use crate::error::{Result, ToyotaError};

/// Public key of the mobile app, sent on every API call.
pub const API_KEY: &str = "tTZipv6liF74PwMfk9Ed68AQ0bISswwf3iHQdqcF";
pub const CHANNEL: &str = "ONEAPP";
pub const BRAND: &str = "T";
pub const CLIENT_USER_AGENT: &str = "okhttp/4.10.0";

/// HTTP methods the vendor API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl TryFrom<&Method> for ApiMethod {
    type Error = ToyotaError;

    fn try_from(method: &Method) -> Result<Self> {
        method
            .as_str()
            .parse()
            .map_err(|_| ToyotaError::Internal(format!("Unsupported HTTP method {method}")))
    }
}

impl From<ApiMethod> for Method {
    fn from(method: ApiMethod) -> Self {
        match method {
            ApiMethod::Get => Method::GET,
            ApiMethod::Post => Method::POST,
            ApiMethod::Put => Method::PUT,
            ApiMethod::Delete => Method::DELETE,
        }
    }
}

/// Everything one API call needs besides identity.
///
/// # Example
/// ```
/// use mytoyota::api::RequestContext;
/// use reqwest::Method;
///
/// let ctx = RequestContext::builder()
///     .method(Method::GET)
///     .path("/v1/location")
///     .vin("JTDKB20U123456789")
///     .build();
/// assert_eq!(ctx.vin.as_deref(), Some("JTDKB20U123456789"));
/// ```
#[derive(Debug, Clone, Builder)]
pub struct RequestContext {
    pub method: Method,
    /// Path relative to the API base, may carry its own query string.
    #[builder(into)]
    pub path: String,
    /// Sent as the `vin` header when present.
    #[builder(into)]
    pub vin: Option<String>,
    pub body: Option<serde_json::Value>,
    #[builder(default)]
    pub params: Vec<(String, String)>,
    /// Merged over the base header set.
    #[builder(default)]
    pub headers: HeaderMap,
    /// Overrides the gateway's per-call deadline.
    pub timeout: Option<Duration>,
}

/// A successful (200/202) response with its body read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    /// Decode the body. Failures surface as API errors carrying the body text.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            ToyotaError::api(
                self.status.as_u16(),
                format!("undecodable response ({e}): {}", self.body),
            )
        })
    }
}

/// Funnel for vendor API calls, holding only a handle to the [`TokenManager`].
#[derive(Debug, Clone)]
pub struct RequestGateway {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    tokens: Arc<TokenManager>,
}

impl RequestGateway {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        tokens: Arc<TokenManager>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
            tokens,
        })
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// Issue an authenticated call and return the raw response.
    ///
    /// A 401 triggers exactly one token refresh and retry; a second 401
    /// surfaces as [`ToyotaError::Api`].
    pub async fn request_raw(&self, ctx: RequestContext) -> Result<RawResponse> {
        let method = ApiMethod::try_from(&ctx.method)?;
        let token = self.tokens.active_token().await?;
        let response = self.send(&ctx, method, &token).await?;

        if response.status == StatusCode::UNAUTHORIZED {
            debug!(path = %redact(&ctx.path), "Access token rejected, retrying once");
            self.tokens.invalidate(&token.access_token).await;
            let token = self.tokens.active_token().await?;
            let retried = self.send(&ctx, method, &token).await?;
            return classify(retried);
        }

        classify(response)
    }

    /// [`Self::request_raw`] followed by JSON decoding.
    pub async fn request_json<T: DeserializeOwned>(&self, ctx: RequestContext) -> Result<T> {
        self.request_raw(ctx).await?.json()
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn build_headers(&self, ctx: &RequestContext, token: &ActiveToken) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static(API_KEY));
        headers.insert("x-guid", header_value(&token.uuid)?);
        headers.insert("guid", header_value(&token.uuid)?);
        let mut bearer = header_value(&format!("Bearer {}", token.access_token))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("x-channel", HeaderValue::from_static(CHANNEL));
        headers.insert("x-brand", HeaderValue::from_static(BRAND));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(
            HeaderName::from_static("x-correlationid"),
            header_value(&Uuid::new_v4().to_string())?,
        );
        if let Some(vin) = &ctx.vin {
            headers.insert("vin", header_value(vin)?);
        }

        for name in ctx.headers.keys() {
            headers.remove(name);
        }
        for (name, value) in &ctx.headers {
            headers.append(name, value.clone());
        }
        Ok(headers)
    }

    async fn send(
        &self,
        ctx: &RequestContext,
        method: ApiMethod,
        token: &ActiveToken,
    ) -> Result<RawResponse> {
        let url = self.url_for(&ctx.path);
        let headers = self.build_headers(ctx, token)?;
        let timeout = ctx.timeout.unwrap_or(self.timeout);
        let logged_body = ctx
            .body
            .as_ref()
            .map(|b| redact(&b.to_string()))
            .unwrap_or_default();
        debug!(
            method = %method,
            url = %redact(&url),
            headers = %redact_headers(&headers),
            body = %logged_body,
            "API request"
        );

        let mut request = self
            .client
            .request(method.into(), &url)
            .headers(headers)
            .timeout(timeout);
        if !ctx.params.is_empty() {
            request = request.query(&ctx.params);
        }
        if let Some(body) = &ctx.body {
            request = request.json(body);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ToyotaError::transport(e, timeout))?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .text()
            .await
            .map_err(|e| ToyotaError::transport(e, timeout))?;
        debug!(
            status = status.as_u16(),
            headers = %redact_headers(&headers),
            body = %redact(&body),
            "API response"
        );
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ToyotaError::Internal("Header value contains invalid characters".into()))
}

/// 200 and 202 pass; everything else is an API error.
fn classify(response: RawResponse) -> Result<RawResponse> {
    let status = response.status.as_u16();
    match status {
        200 | 202 => Ok(response),
        _ if is_unsupported(status, &response.body) => Err(ToyotaError::ActionNotSupported {
            status,
            message: response.body,
        }),
        _ => Err(ToyotaError::api(status, response.body)),
    }
}

/// 501, or a client error other than 401 whose body says "not supported".
fn is_unsupported(status: u16, body: &str) -> bool {
    if status == StatusCode::NOT_IMPLEMENTED.as_u16() {
        return true;
    }
    (400..500).contains(&status)
        && status != StatusCode::UNAUTHORIZED.as_u16()
        && body.to_ascii_lowercase().contains("not supported")
}
