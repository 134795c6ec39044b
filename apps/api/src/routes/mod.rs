pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes",
            post(handlers::handle_upload).get(handlers::handle_list),
        )
        .route(
            "/api/v1/resumes/extract",
            post(handlers::handle_extract_text),
        )
        .route(
            "/api/v1/resumes/:id",
            get(handlers::handle_get).delete(handlers::handle_delete),
        )
        .route(
            "/api/v1/resumes/:id/status",
            patch(handlers::handle_update_status),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
