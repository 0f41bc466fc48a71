pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::{handle_analyze_resume, MAX_UPLOAD_BYTES};
use crate::compiler::handlers::handle_compile_latex;
use crate::generation::handlers::{handle_generate_resume, handle_sanitize};
use crate::profiles::handlers as profiles;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/generate-resume", post(handle_generate_resume))
        .route("/api/compile-latex", post(handle_compile_latex))
        .route("/api/sanitize", post(handle_sanitize))
        .route(
            "/api/analyze-resume",
            post(handle_analyze_resume).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Profiles API
        .route(
            "/api/profiles",
            get(profiles::handle_list_profiles)
                .post(profiles::handle_create_profile)
                .delete(profiles::handle_clear_profiles),
        )
        .route(
            "/api/profiles/:id",
            get(profiles::handle_get_profile)
                .put(profiles::handle_update_profile)
                .delete(profiles::handle_delete_profile),
        )
        .with_state(state)
}
