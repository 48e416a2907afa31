use crate::services::appointments::{create_appointment, list_appointments};
use crate::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/appointments",
            get(list_appointments).post(create_appointment),
        )
        .with_state(app_state)
}
