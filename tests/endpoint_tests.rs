mod auth_support;

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use mytoyota::api::{Api, TripsQuery};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_support::{config_for, credential, forbid_login, InMemoryTokenStore, ACCOUNT_UUID};

const VIN: &str = "JTDKB20U123456789";

async fn api_with_live_token(server: &MockServer) -> Api {
    forbid_login(server).await;
    let store = Arc::new(InMemoryTokenStore::seeded(credential(
        "LIVE",
        "REFRESH",
        Duration::hours(1),
    )));
    Api::with_token_store(config_for(server, None), store).unwrap()
}

async fn mount_vin_get(server: &MockServer, endpoint: &str, payload: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(header("vin", VIN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": {"messages": [{"responseCode": "OK", "description": "ok"}]},
            "payload": payload
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn trips_query_is_sent_literally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/trips"))
        .and(query_param("from", "2024-01-01"))
        .and(query_param("to", "2024-01-31"))
        .and(query_param("route", "False"))
        .and(query_param("summary", "True"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "0"))
        .and(header("vin", VIN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payload": {"from": "2024-01-01", "to": "2024-01-31", "trips": [],
                        "_metadata": {"pagination": {"limit": 5, "offset": 0, "totalCount": 0}}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let api = api_with_live_token(&server).await;

    let query = TripsQuery::builder()
        .from(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .to(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        .build();
    let trips = api.get_trips(VIN, &query).await.unwrap().payload.unwrap();
    assert!(trips.trips.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("from=2024-01-01&to=2024-01-31&route=False&summary=True&limit=5&offset=0")
    );
}

#[tokio::test]
async fn set_alias_puts_the_nickname() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/vehicle-association/vehicle"))
        .and(header("vin", VIN))
        .and(header("content-type", "application/json"))
        .and(header_exists("datetime"))
        .and(body_json(json!({"guid": ACCOUNT_UUID, "vin": VIN, "nickName": "Red Rocket"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "SUCCESS"})))
        .expect(1)
        .mount(&server)
        .await;
    let api = api_with_live_token(&server).await;

    let response = api
        .set_vehicle_alias("Red Rocket", ACCOUNT_UUID, VIN)
        .await
        .unwrap();
    assert_eq!(response["status"], "SUCCESS");

    let requests = server.received_requests().await.unwrap();
    let stamp: i64 = requests[0].headers["datetime"].to_str().unwrap().parse().unwrap();
    assert!(stamp > 1_600_000_000_000);
}

#[tokio::test]
async fn set_alias_accepts_an_empty_reply() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/vehicle-association/vehicle"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let api = api_with_live_token(&server).await;

    let response = api.set_vehicle_alias("x", ACCOUNT_UUID, VIN).await.unwrap();
    assert!(response.is_null());
}

#[tokio::test]
async fn vehicle_list_needs_no_vin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/vehicle/guid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "SUCCESS",
            "payload": [{"vin": VIN, "nickName": "Yaris", "fuelType": "H"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let api = api_with_live_token(&server).await;

    let vehicles = api.get_vehicles().await.unwrap().payload.unwrap();
    assert_eq!(vehicles[0].vin.as_deref(), Some(VIN));
    assert_eq!(vehicles[0].fuel_type.as_deref(), Some("H"));
}

#[tokio::test]
async fn vin_scoped_endpoints_decode_their_payloads() {
    let server = MockServer::start().await;
    mount_vin_get(
        &server,
        "/v1/location",
        json!({"vehicleLocation": {"latitude": 48.1, "longitude": 11.5}}),
    )
    .await;
    mount_vin_get(
        &server,
        "/v1/vehiclehealth/status",
        json!({"warning": [], "quantityOfEngOilIcon": []}),
    )
    .await;
    mount_vin_get(
        &server,
        "/v1/global/remote/status",
        json!({"vehicleStatus": [{"category": "Other", "sections": []}]}),
    )
    .await;
    mount_vin_get(
        &server,
        "/v1/global/remote/electric/status",
        json!({"batteryLevel": 64, "chargingStatus": "none"}),
    )
    .await;
    mount_vin_get(
        &server,
        "/v3/telemetry",
        json!({"odometer": {"value": 5012.0, "unit": "km"}}),
    )
    .await;
    mount_vin_get(
        &server,
        "/v2/notification/history",
        json!([{"guid": ACCOUNT_UUID, "notifications": []}]),
    )
    .await;
    mount_vin_get(
        &server,
        "/v1/servicehistory/vehicle/summary",
        json!({"serviceHistories": []}),
    )
    .await;
    let api = api_with_live_token(&server).await;

    let location = api.get_location(VIN).await.unwrap().payload.unwrap();
    assert_eq!(location.vehicle_location.unwrap().latitude, Some(48.1));

    let health = api.get_vehicle_health_status(VIN).await.unwrap().payload.unwrap();
    assert!(!health.has_warnings());

    let remote = api.get_remote_status(VIN).await.unwrap().payload.unwrap();
    assert_eq!(remote.vehicle_status[0].category.as_deref(), Some("Other"));

    let electric = api.get_vehicle_electric_status(VIN).await.unwrap().payload.unwrap();
    assert_eq!(electric.battery_level, Some(64));

    let telemetry = api.get_telemetry(VIN).await.unwrap().payload.unwrap();
    assert_eq!(telemetry.odometer.unwrap().value, Some(5012.0));

    let notifications = api.get_notifications(VIN).await.unwrap().payload.unwrap();
    assert_eq!(notifications[0].guid.as_deref(), Some(ACCOUNT_UUID));

    let history = api.get_service_history(VIN).await.unwrap().payload.unwrap();
    assert!(history.service_histories.is_empty());
}
