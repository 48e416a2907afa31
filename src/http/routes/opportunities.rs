use crate::services::opportunities::{create_opportunity, get_pipelines, update_opportunity};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

pub fn routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/pipelines", get(get_pipelines))
        .route("/opportunities", post(create_opportunity))
        .route("/opportunities/{opportunity_id}", put(update_opportunity))
        .with_state(app_state)
}
