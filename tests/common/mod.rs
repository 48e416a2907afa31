use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use ghl_bridge::{
    config::{AppConfig, GhlConfig, HttpConfig},
    http::routes::create_routes,
    state::AppState,
    utils::http_client::{ForwardError, Forwarder, UpstreamRequest, UpstreamResponse},
};
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub struct FakeUpstream {
    pub calls: Mutex<Vec<UpstreamRequest>>,
    status: StatusCode,
    body: Value,
}

impl FakeUpstream {
    pub fn new(status: StatusCode, body: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            status,
            body,
        })
    }

    pub fn calls(&self) -> Vec<UpstreamRequest> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl Forwarder for FakeUpstream {
    async fn forward(&self, request: UpstreamRequest) -> Result<UpstreamResponse, ForwardError> {
        self.calls.lock().expect("calls lock").push(request);
        Ok(UpstreamResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

pub fn config(api_base: &str, calendar_id: Option<&str>) -> AppConfig {
    AppConfig {
        http: HttpConfig {
            address: "127.0.0.1".to_string(),
            port: "0".to_string(),
        },
        ghl: GhlConfig {
            api_key: "pit-test".to_string(),
            location_id: "loc-1".to_string(),
            calendar_id: calendar_id.map(str::to_string),
            api_base: api_base.to_string(),
            api_version: "2021-07-28".to_string(),
        },
        log_dir: "app/logs".to_string(),
    }
}

pub fn app(forwarder: Arc<dyn Forwarder>, config: AppConfig) -> Router {
    create_routes(Arc::new(AppState {
        config: Arc::new(config),
        forwarder,
    }))
}

/// Sends one request through the router and returns status and JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}
