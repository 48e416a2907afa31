use crate::error::ApiError;
use crate::models::appointment::{AppointmentCreate, AppointmentQuery};
use crate::services::payload_generator::{build_appointment_payload, build_appointment_query};
use crate::state::AppState;
use crate::utils::http_client::{UpstreamRequest, UpstreamResponse};
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub async fn create_appointment(
    State(app_state): State<Arc<AppState>>,
    Json(appointment): Json<AppointmentCreate>,
) -> Result<UpstreamResponse, ApiError> {
    let payload = build_appointment_payload(&appointment, &app_state.config.ghl)?;

    info!(
        "Booking appointment for contact {} at {}",
        appointment.contact_id, appointment.start_time
    );
    let request = UpstreamRequest::post("/calendars/events/appointments").with_body(payload);
    Ok(app_state.forwarder.forward(request).await?)
}

pub async fn list_appointments(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<AppointmentQuery>,
) -> Result<UpstreamResponse, ApiError> {
    let params = build_appointment_query(&query, &app_state.config.ghl, Utc::now())?;

    let request = UpstreamRequest::get("/calendars/events").with_query(params);
    Ok(app_state.forwarder.forward(request).await?)
}
