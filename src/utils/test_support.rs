use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::config::{AppConfig, GhlConfig, HttpConfig};
use crate::state::AppState;
use crate::utils::http_client::{ForwardError, Forwarder, UpstreamRequest, UpstreamResponse};

enum Reply {
    Respond(StatusCode, Value),
    Fail(String),
}

/// In-memory upstream that records every call it receives.
pub struct RecordingForwarder {
    calls: Mutex<Vec<UpstreamRequest>>,
    reply: Reply,
}

impl RecordingForwarder {
    pub fn responding(status: StatusCode, body: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: Reply::Respond(status, body),
        })
    }

    pub fn failing(cause: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: Reply::Fail(cause.to_string()),
        })
    }

    pub fn calls(&self) -> Vec<UpstreamRequest> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn single_call(&self) -> UpstreamRequest {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one upstream call");
        calls.into_iter().next().expect("one call")
    }
}

#[async_trait]
impl Forwarder for RecordingForwarder {
    async fn forward(&self, request: UpstreamRequest) -> Result<UpstreamResponse, ForwardError> {
        self.calls.lock().expect("calls lock").push(request);
        match &self.reply {
            Reply::Respond(status, body) => Ok(UpstreamResponse {
                status: *status,
                body: body.clone(),
            }),
            Reply::Fail(cause) => Err(ForwardError::Unreachable(cause.clone())),
        }
    }
}

pub fn test_state(forwarder: Arc<RecordingForwarder>, calendar_id: Option<&str>) -> Arc<AppState> {
    let config = AppConfig {
        http: HttpConfig {
            address: "127.0.0.1".to_string(),
            port: "0".to_string(),
        },
        ghl: GhlConfig {
            api_key: "pit-test".to_string(),
            location_id: "loc-1".to_string(),
            calendar_id: calendar_id.map(str::to_string),
            api_base: "http://upstream.test".to_string(),
            api_version: "2021-07-28".to_string(),
        },
        log_dir: "app/logs".to_string(),
    };

    Arc::new(AppState {
        config: Arc::new(config),
        forwarder,
    })
}
