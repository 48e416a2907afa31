use crate::error::ApiError;
use crate::models::message::{EmailRequest, SmsRequest};
use crate::services::payload_generator::{build_email_payload, build_sms_payload};
use crate::state::AppState;
use crate::utils::http_client::{UpstreamRequest, UpstreamResponse};
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

/// SMS and email share this endpoint; the payload shape picks the channel.
const MESSAGES_PATH: &str = "/conversations/messages";

pub async fn send_sms(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<SmsRequest>,
) -> Result<UpstreamResponse, ApiError> {
    info!("Sending SMS to contact {}", req.contact_id);
    let request = UpstreamRequest::post(MESSAGES_PATH).with_body(build_sms_payload(&req));
    Ok(app_state.forwarder.forward(request).await?)
}

pub async fn send_email(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<EmailRequest>,
) -> Result<UpstreamResponse, ApiError> {
    info!("Sending email to contact {}", req.contact_id);
    let request = UpstreamRequest::post(MESSAGES_PATH).with_body(build_email_payload(&req));
    Ok(app_state.forwarder.forward(request).await?)
}
