use crate::services::enrollment::{add_to_campaign, add_to_workflow};
use crate::state::AppState;
use axum::{routing::post, Router};
use std::sync::Arc;

pub fn routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/add_to_campaign", post(add_to_campaign))
        .route("/add_to_workflow", post(add_to_workflow))
        .with_state(app_state)
}
