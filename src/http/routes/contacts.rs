use crate::services::contacts::{create_contact, update_contact};
use crate::state::AppState;
use axum::{
    routing::{post, put},
    Router,
};
use std::sync::Arc;

pub fn routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/contacts", post(create_contact))
        .route("/contacts/{contact_id}", put(update_contact))
        .with_state(app_state)
}
