//! One method per vendor endpoint.

use std::sync::Arc;

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;

use super::endpoints::{self, TripsQuery};
use super::gateway::{RequestContext, RequestGateway};
use crate::auth::{AuthBackend, Authenticator, FileTokenStore, TokenManager, TokenStore};
use crate::config::ClientConfig;
use crate::error::{Result, ToyotaError};
use crate::models::{
    ElectricStatusResponse, HealthStatusResponse, LocationResponse, NotificationResponse,
    RemoteStatusResponse, ServiceHistoryResponse, TelemetryResponse, TripsResponse,
    VehicleAlias, VehiclesResponse,
};

/// Typed client for the connected-car API.
///
/// # Example
/// ```no_run
/// use mytoyota::api::Api;
/// use mytoyota::config::ClientConfig;
///
/// # async fn example() -> mytoyota::Result<()> {
/// let config = ClientConfig::builder()
///     .username("driver@example.com")
///     .password("secret")
///     .build();
/// let api = Api::new(config)?;
/// api.login().await?;
/// for vehicle in api.get_vehicles().await?.payload.unwrap_or_default() {
///     println!("{:?}", vehicle.nick_name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Api {
    gateway: RequestGateway,
}

impl Api {
    /// Client with the file-backed credential cache.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let store: Arc<dyn TokenStore> = Arc::new(match &config.cache_path {
            Some(path) => FileTokenStore::new(path.clone()),
            None => FileTokenStore::new_default(),
        });
        Self::with_token_store(config, store)
    }

    pub fn with_token_store(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        config.validate()?;
        let backend = Arc::new(Authenticator::new(
            config.endpoints.clone(),
            config.timeout(),
        )?);
        Self::with_backend(config, backend, store)
    }

    /// Client with a custom login flow.
    pub fn with_backend(
        config: ClientConfig,
        backend: Arc<dyn AuthBackend>,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self> {
        config.validate()?;
        let tokens = Arc::new(TokenManager::new(
            config.username.clone(),
            config.password.clone(),
            backend,
            store,
        ));
        let gateway = RequestGateway::new(
            config.endpoints.api_base_url.clone(),
            config.timeout(),
            tokens,
        )?;
        Ok(Self { gateway })
    }

    pub fn gateway(&self) -> &RequestGateway {
        &self.gateway
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        self.gateway.tokens()
    }

    /// Make sure a usable token is held, logging in if needed.
    pub async fn login(&self) -> Result<()> {
        self.tokens().ensure_valid().await
    }

    pub async fn get_vehicles(&self) -> Result<VehiclesResponse> {
        self.get(endpoints::VEHICLE_GUID, None).await
    }

    /// Rename a vehicle. The server replies with an empty envelope.
    pub async fn set_vehicle_alias(
        &self,
        alias: &str,
        guid: &str,
        vin: &str,
    ) -> Result<serde_json::Value> {
        let body = serde_json::to_value(VehicleAlias {
            guid: guid.to_string(),
            vin: vin.to_string(),
            nick_name: alias.to_string(),
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(
            "datetime",
            HeaderValue::from_str(&Utc::now().timestamp_millis().to_string())
                .map_err(|e| ToyotaError::Internal(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let ctx = RequestContext::builder()
            .method(Method::PUT)
            .path(endpoints::VEHICLE_ASSOCIATION)
            .vin(vin)
            .body(body)
            .headers(headers)
            .build();
        let response = self.gateway.request_raw(ctx).await?;
        if response.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        response.json()
    }

    pub async fn get_location(&self, vin: &str) -> Result<LocationResponse> {
        self.get(endpoints::LOCATION, Some(vin)).await
    }

    pub async fn get_vehicle_health_status(&self, vin: &str) -> Result<HealthStatusResponse> {
        self.get(endpoints::HEALTH_STATUS, Some(vin)).await
    }

    pub async fn get_remote_status(&self, vin: &str) -> Result<RemoteStatusResponse> {
        self.get(endpoints::REMOTE_STATUS, Some(vin)).await
    }

    pub async fn get_vehicle_electric_status(&self, vin: &str) -> Result<ElectricStatusResponse> {
        self.get(endpoints::ELECTRIC_STATUS, Some(vin)).await
    }

    pub async fn get_telemetry(&self, vin: &str) -> Result<TelemetryResponse> {
        self.get(endpoints::TELEMETRY, Some(vin)).await
    }

    pub async fn get_notifications(&self, vin: &str) -> Result<NotificationResponse> {
        self.get(endpoints::NOTIFICATION_HISTORY, Some(vin)).await
    }

    pub async fn get_trips(&self, vin: &str, query: &TripsQuery) -> Result<TripsResponse> {
        self.get(&query.path(), Some(vin)).await
    }

    pub async fn get_service_history(&self, vin: &str) -> Result<ServiceHistoryResponse> {
        self.get(endpoints::SERVICE_HISTORY, Some(vin)).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, vin: Option<&str>) -> Result<T> {
        let ctx = RequestContext::builder()
            .method(Method::GET)
            .path(path)
            .maybe_vin(vin)
            .build();
        self.gateway.request_json(ctx).await
    }
}
