pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::orchestrator::handlers as orchestrator_handlers;
use crate::state::AppState;
use crate::upload::handlers as upload_handlers;
use crate::upload::MAX_UPLOAD_BYTES;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resume",
            post(upload_handlers::handle_upload_resume),
        )
        .route(
            "/api/v1/generate",
            post(orchestrator_handlers::handle_generate),
        )
        .route(
            "/api/v1/session",
            get(orchestrator_handlers::handle_session),
        )
        // Above the 10 MB cap so oversized uploads reach our own validation
        // message instead of a bare 413.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 2 * 1024 * 1024))
        .with_state(state)
}
