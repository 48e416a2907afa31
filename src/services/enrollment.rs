use crate::error::ApiError;
use crate::models::enrollment::{CampaignEnrollment, WorkflowEnrollment};
use crate::services::payload_generator::path_segment;
use crate::state::AppState;
use crate::utils::http_client::{UpstreamRequest, UpstreamResponse};
use axum::extract::{Query, State};
use std::sync::Arc;
use tracing::info;

pub async fn add_to_campaign(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<CampaignEnrollment>,
) -> Result<UpstreamResponse, ApiError> {
    info!(
        "Adding contact {} to campaign {}",
        params.contact_id, params.campaign_id
    );
    let request = UpstreamRequest::post(format!(
        "/contacts/{}/campaigns/{}",
        path_segment(&params.contact_id, "contactId")?,
        path_segment(&params.campaign_id, "campaignId")?
    ));
    Ok(app_state.forwarder.forward(request).await?)
}

pub async fn add_to_workflow(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<WorkflowEnrollment>,
) -> Result<UpstreamResponse, ApiError> {
    info!(
        "Adding contact {} to workflow {}",
        params.contact_id, params.workflow_id
    );
    let request = UpstreamRequest::post(format!(
        "/contacts/{}/workflow/{}",
        path_segment(&params.contact_id, "contactId")?,
        path_segment(&params.workflow_id, "workflowId")?
    ));
    Ok(app_state.forwarder.forward(request).await?)
}
