use async_trait::async_trait;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue},
    Client, Method, StatusCode,
};
use serde_json::{json, Value};
use std::time::Instant;
use thiserror::Error;
use tracing::{error, event, info, Level};

use crate::config::GhlConfig;

/// Placeholder relayed when the upstream answers with an empty, non-JSON body.
pub const EMPTY_BODY_MESSAGE: &str = "No response body";

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
    #[error("{0}")]
    Unreachable(String),
}

/// One outbound call to the CRM API.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub query: Option<Vec<(String, String)>>,
}

impl UpstreamRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = Some(query);
        self
    }
}

/// Upstream status and decoded body, relayed to the caller as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl UpstreamResponse {
    /// Decodes `text` as JSON, falling back to `{"message": text}`.
    pub fn from_text(status: StatusCode, text: &str) -> Self {
        let body = serde_json::from_str::<Value>(text).unwrap_or_else(|_| {
            let message = if text.is_empty() {
                EMPTY_BODY_MESSAGE
            } else {
                text
            };
            json!({ "message": message })
        });
        Self { status, body }
    }
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Performs exactly one outbound call. Upstream error statuses are
    /// returned as `Ok`; only a call that could not complete is an `Err`.
    async fn forward(&self, request: UpstreamRequest) -> Result<UpstreamResponse, ForwardError>;
}

pub struct ReqwestForwarder {
    client: Client,
    base_url: String,
}

impl ReqwestForwarder {
    pub fn new(config: &GhlConfig) -> Result<Self, ForwardError> {
        let client = Client::builder()
            .default_headers(default_headers(&config.api_key, &config.api_version)?)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
        })
    }
}

fn default_headers(api_key: &str, api_version: &str) -> Result<HeaderMap, ForwardError> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, auth);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static("version"),
        HeaderValue::from_str(api_version)?,
    );
    Ok(headers)
}

#[async_trait]
impl Forwarder for ReqwestForwarder {
    async fn forward(&self, request: UpstreamRequest) -> Result<UpstreamResponse, ForwardError> {
        let url = format!("{}{}", self.base_url, request.path);
        let start = Instant::now();

        info!("Forwarding {} request to {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(query) = &request.query {
            builder = builder.query(query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(res) => res,
            Err(e) => {
                error!("❌ Request to {} failed: {}", url, error_chain(&e));
                return Err(e.into());
            }
        };

        let status = response.status();
        let text = response.text().await?;

        event!(
            target: "perf",
            Level::INFO,
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            duration_ms = %start.elapsed().as_millis(),
            "API timing(forward)"
        );

        Ok(UpstreamResponse::from_text(status, &text))
    }
}

/// Renders an error with all of its sources, e.g. the OS-level cause behind
/// a reqwest connect failure.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
