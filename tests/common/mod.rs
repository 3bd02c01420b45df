//! Shared helpers for the integration tests.
//!
//! Every test runs against its own `wiremock::MockServer` standing in for
//! the FIB gateway.

#![allow(dead_code)]

use std::sync::Once;

use serde_json::json;
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fib_rs::prelude::*;

pub const TOKEN_PATH: &str = "/auth/realms/fib-online-shop/protocol/openid-connect/token";
pub const PAYMENTS_PATH: &str = "/protected/v1/payments";

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const ACCESS_TOKEN: &str = "access-token-1";

pub const PAYMENT_ID: &str = "5b3c7f0e-2a51-4d8e-9c36-7a1f0d6e4b21";

static INIT: Once = Once::new();

/// Initialize logging for tests
pub fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn token_body(expires_in: i64) -> serde_json::Value {
    json!({
        "access_token": ACCESS_TOKEN,
        "expires_in": expires_in,
        "refresh_expires_in": 1800,
        "refresh_token": "refresh-token-1",
        "token_type": "Bearer",
        "not-before-policy": 0,
        "scope": "profile email"
    })
}

/// A token endpoint mock accepting the test credentials.
pub fn token_mock(expires_in: i64) -> Mock {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains(format!("client_id={CLIENT_ID}")))
        .and(body_string_contains(format!("client_secret={CLIENT_SECRET}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(expires_in)))
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::default().with_base_url(server.uri())
}

pub async fn connect(config: ClientConfig) -> fib_rs::Result<FibClient> {
    init_logging();
    FibClient::with_config(
        Credentials::new(CLIENT_ID, CLIENT_SECRET),
        Environment::Staging,
        config,
    )
    .await
}

/// Start a gateway mock with a long-lived token and an authenticated client.
pub async fn authenticated_client() -> (MockServer, FibClient) {
    let server = MockServer::start().await;
    token_mock(300).mount(&server).await;
    let client = connect(config_for(&server))
        .await
        .expect("Failed to create client");
    (server, client)
}

pub fn payment_id() -> PaymentId {
    PAYMENT_ID.parse().expect("valid payment id")
}

pub fn error_body(code: &str, title: &str, detail: &str) -> serde_json::Value {
    json!({
        "traceId": "e3b0c442-98fc-1c14-9afb-f4c8996fb924",
        "errors": [{ "code": code, "title": title, "detail": detail }]
    })
}
