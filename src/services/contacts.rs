use crate::error::ApiError;
use crate::models::contact::{ContactCreate, ContactUpdate};
use crate::services::payload_generator::{
    build_create_payload, build_update_payload, path_segment,
};
use crate::state::AppState;
use crate::utils::http_client::{UpstreamRequest, UpstreamResponse};
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

pub async fn create_contact(
    State(app_state): State<Arc<AppState>>,
    Json(contact): Json<ContactCreate>,
) -> Result<UpstreamResponse, ApiError> {
    let payload = build_create_payload(&contact, app_state.location_id())?;

    info!("Creating contact in location {}", app_state.location_id());
    let request = UpstreamRequest::post("/contacts/").with_body(payload);
    Ok(app_state.forwarder.forward(request).await?)
}

pub async fn update_contact(
    Path(contact_id): Path<String>,
    State(app_state): State<Arc<AppState>>,
    Json(contact): Json<ContactUpdate>,
) -> Result<UpstreamResponse, ApiError> {
    let segment = path_segment(&contact_id, "contactId")?;
    let payload = build_update_payload(&contact, app_state.location_id())?;

    info!("Updating contact {}", contact_id);
    let request = UpstreamRequest::put(format!("/contacts/{}", segment)).with_body(payload);
    Ok(app_state.forwarder.forward(request).await?)
}
