#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use hotel_booking_api::app::{app, AppState};
use hotel_booking_api::auth::{generate_jwt, Claims, Role};
use hotel_booking_api::config::SecurityConfig;
use hotel_booking_api::database::{
    CustomerRepository, InMemoryCustomerRepository, InMemoryRoomRepository, RoomRepository,
};
use hotel_booking_api::secrets::{
    InMemorySecretsProvider, SecretsProvider, JWT_SIGNING_ACCESS_TOKEN,
};

pub const SECRET: &str = "6b45b2cb79974f989447f1d850d139f1";

/// Token signed with [`SECRET`]
pub fn token(role: Role) -> String {
    let claims = Claims::new(None, Some(role), Utc::now(), chrono::Duration::days(1));
    generate_jwt(&claims, SECRET).expect("token")
}

/// A running binary backed by the in-memory stores. Killed on drop.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let server = Self::spawn()?;
        server.wait_ready(Duration::from_secs(15)).await?;
        Ok(server)
    }

    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_hotel-booking-api"))
            .args(["serve", "--port", &port.to_string(), "--store", "memory"])
            .env("APP_ENV", "development")
            .env("SERVER_HOST", "127.0.0.1")
            .env("SECRETS_PROVIDER", "env")
            .env(JWT_SIGNING_ACCESS_TOKEN, SECRET)
            .env("SECURITY_PASSWORD_HASH_COST", "4")
            .env("RUST_LOG", "warn")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        let url = format!("{}/health", self.base_url);
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Router over fresh in-memory stores, for in-process requests
pub fn router() -> Router {
    router_with(
        Arc::new(InMemoryCustomerRepository::new()),
        Arc::new(InMemoryRoomRepository::new()),
        Arc::new(InMemorySecretsProvider::with_secret(JWT_SIGNING_ACCESS_TOKEN, SECRET)),
    )
}

/// Router over the given stores and secrets
pub fn router_with(
    customers: Arc<dyn CustomerRepository>,
    rooms: Arc<dyn RoomRepository>,
    secrets: Arc<dyn SecretsProvider>,
) -> Router {
    let security = SecurityConfig {
        enable_cors: false,
        access_token_ttl_days: 30,
        password_hash_cost: 4,
    };
    let state = AppState::new(customers, rooms, secrets, &security).expect("request schemas");
    app(state, false)
}

/// Send one request through `router` and decode the JSON reply
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn post_json(path: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(path).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

pub fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::empty()).expect("request")
}
