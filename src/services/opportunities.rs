use crate::error::ApiError;
use crate::models::opportunity::{OpportunityCreate, OpportunityUpdate};
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

pub async fn get_pipelines(
    State(app_state): State<Arc<AppState>>,
) -> Result<UpstreamResponse, ApiError> {
    let request = UpstreamRequest::get("/opportunities/pipelines");
    Ok(app_state.forwarder.forward(request).await?)
}

pub async fn create_opportunity(
    State(app_state): State<Arc<AppState>>,
    Json(opportunity): Json<OpportunityCreate>,
) -> Result<UpstreamResponse, ApiError> {
    let payload = build_create_payload(&opportunity, app_state.location_id())?;

    info!(
        "Creating opportunity {} in pipeline {}",
        opportunity.name, opportunity.pipeline_id
    );
    let request = UpstreamRequest::post("/opportunities/").with_body(payload);
    Ok(app_state.forwarder.forward(request).await?)
}

pub async fn update_opportunity(
    Path(opportunity_id): Path<String>,
    State(app_state): State<Arc<AppState>>,
    Json(updates): Json<OpportunityUpdate>,
) -> Result<UpstreamResponse, ApiError> {
    let segment = path_segment(&opportunity_id, "opportunityId")?;
    let payload = build_update_payload(&updates, app_state.location_id())?;

    info!("Updating opportunity {}", opportunity_id);
    let request = UpstreamRequest::put(format!("/opportunities/{}", segment)).with_body(payload);
    Ok(app_state.forwarder.forward(request).await?)
}
