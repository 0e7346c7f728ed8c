#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use mytoyota::auth::{Credential, TokenStore};
use mytoyota::config::{ClientConfig, Endpoints};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "driver@example.com";
pub const PASSWORD: &str = "hunter2";
pub const ACCOUNT_UUID: &str = "6e3f1c2a-0000-4000-8000-000000000001";
pub const TOKEN_ID: &str = "session-token-id";
pub const AUTH_CODE: &str = "auth-code-123";

pub const AUTHENTICATE_PATH: &str = "/json/realms/root/realms/tme/authenticate";
pub const AUTHORIZE_PATH: &str = "/oauth2/realms/root/realms/tme/authorize";
pub const ACCESS_TOKEN_PATH: &str = "/oauth2/realms/root/realms/tme/access_token";

#[derive(Default)]
pub struct InMemoryTokenStore {
    credential: Mutex<Option<Credential>>,
    saves: AtomicUsize,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(credential: Credential) -> Self {
        let store = Self::default();
        *store.credential.lock().expect("store lock poisoned") = Some(credential);
        store
    }

    pub fn get(&self) -> Option<Credential> {
        self.credential.lock().expect("store lock poisoned").clone()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self, username: &str) -> Option<Credential> {
        self.get().filter(|c| c.username == username)
    }

    fn save(&self, credential: &Credential) -> mytoyota::Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.credential.lock().expect("store lock poisoned") = Some(credential.clone());
        Ok(())
    }
}

/// Unsigned id token carrying `uuid` for the vendor audience.
pub fn id_token(uuid: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({"uuid": uuid, "aud": "oneappsdkclient"}).to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

pub fn token_body(access_token: &str, refresh_token: &str) -> serde_json::Value {
    json!({
        "access_token": access_token,
        "refresh_token": refresh_token,
        "id_token": id_token(ACCOUNT_UUID),
        "token_type": "Bearer",
        "expires_in": 3599
    })
}

pub fn credential(access_token: &str, refresh_token: &str, valid_for: Duration) -> Credential {
    Credential {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
        uuid: ACCOUNT_UUID.to_string(),
        expiration: Utc::now() + valid_for,
        username: USERNAME.to_string(),
    }
}

pub fn endpoints_for(server: &MockServer) -> Endpoints {
    let base = server.uri();
    Endpoints {
        authenticate_url: format!("{base}{AUTHENTICATE_PATH}?authIndexType=service&authIndexValue=oneapp"),
        authorize_url: format!("{base}{AUTHORIZE_PATH}?client_id=oneapp&response_type=code"),
        access_token_url: format!("{base}{ACCESS_TOKEN_PATH}"),
        api_base_url: base,
    }
}

pub fn config_for(server: &MockServer, cache_path: Option<PathBuf>) -> ClientConfig {
    ClientConfig::builder()
        .username(USERNAME)
        .password(PASSWORD)
        .timeout_seconds(5)
        .maybe_cache_path(cache_path)
        .endpoints(endpoints_for(server))
        .build()
}

fn callbacks() -> serde_json::Value {
    json!({
        "authId": "auth-id-1",
        "callbacks": [
            {"type": "NameCallback",
             "output": [{"name": "prompt", "value": "User Name"}],
             "input": [{"name": "IDToken1", "value": ""}]},
            {"type": "PasswordCallback",
             "output": [{"name": "prompt", "value": "Password"}],
             "input": [{"name": "IDToken2", "value": ""}]}
        ]
    })
}

/// Mount the three login stages, each expected `times` times.
pub async fn mount_login_flow(server: &MockServer, access_token: &str, refresh_token: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path(AUTHENTICATE_PATH))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(callbacks()))
        .expect(times)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(AUTHENTICATE_PATH))
        .and(body_string_contains(USERNAME))
        .and(body_string_contains(PASSWORD))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tokenId": TOKEN_ID,
            "successUrl": "/console",
            "realm": "/tme"
        })))
        .expect(times)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(AUTHORIZE_PATH))
        .and(header("cookie", format!("iPlanetDirectoryPro={TOKEN_ID}").as_str()))
        .respond_with(ResponseTemplate::new(302).insert_header(
            "location",
            format!("com.toyota.oneapp:/oauth2Callback?code={AUTH_CODE}&iss=tme").as_str(),
        ))
        .expect(times)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(ACCESS_TOKEN_PATH))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains(format!("code={AUTH_CODE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(access_token, refresh_token)))
        .expect(times)
        .mount(server)
        .await;
}

/// Mount a refresh-token exchange for `refresh_token` answering with `response`.
pub async fn mount_refresh(server: &MockServer, refresh_token: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(path(ACCESS_TOKEN_PATH))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains(format!("refresh_token={refresh_token}")))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

/// Fail the test if a full login is attempted.
pub async fn forbid_login(server: &MockServer) {
    for p in [AUTHENTICATE_PATH, AUTHORIZE_PATH] {
        Mock::given(path(p))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(server)
            .await;
    }
}

/// Fail the test if the token endpoint is called at all.
pub async fn forbid_token_exchange(server: &MockServer) {
    Mock::given(path(ACCESS_TOKEN_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}
