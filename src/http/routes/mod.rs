pub mod appointments;
pub mod contacts;
pub mod enrollment;
pub mod manifest;
pub mod messages;
pub mod opportunities;

use crate::models::core::HealthResponse;
use crate::state::AppState;
use axum::{response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339(),
    };

    Json(response)
}

pub fn create_routes(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/", get(health_check))
        .merge(contacts::routes(app_state.clone()))
        .merge(messages::routes(app_state.clone()))
        .merge(opportunities::routes(app_state.clone()))
        .merge(enrollment::routes(app_state.clone()))
        .merge(appointments::routes(app_state))
        .merge(manifest::routes())
        .layer(cors)
}
