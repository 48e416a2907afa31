use crate::services::messages::{send_email, send_sms};
use crate::state::AppState;
use axum::{routing::post, Router};
use std::sync::Arc;

pub fn routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/send_sms", post(send_sms))
        .route("/send_email", post(send_email))
        .with_state(app_state)
}
