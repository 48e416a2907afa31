use crate::services::manifest::{serve_manifest, serve_openapi};
use axum::{routing::get, Router};

pub fn routes() -> Router {
    Router::new()
        .route("/.well-known/ai-plugin.json", get(serve_manifest))
        .route("/openapi.json", get(serve_openapi))
}
