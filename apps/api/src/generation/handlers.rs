//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::{generate_resume, GenerateResumeRequest, GeneratedResume};
use crate::latex::sanitize;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SanitizeRequest {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SanitizeResponse {
    pub latex: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-resume
///
/// Always answers with a document: the model's when usable, the template's otherwise.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(req): Json<GenerateResumeRequest>,
) -> Result<Json<GeneratedResume>, AppError> {
    let target_role = req.target_role.as_deref().map(str::trim).unwrap_or_default();
    let profile = match req.profile {
        Some(profile) if !target_role.is_empty() => profile,
        _ => return Err(AppError::Validation("Missing required fields".to_string())),
    };

    let resume = generate_resume(
        state.llm.as_ref(),
        &state.generation,
        &profile,
        req.job_description.as_deref(),
        target_role,
    )
    .await;

    Ok(Json(resume))
}

/// POST /api/sanitize
///
/// Runs raw generator text through the sanitizer. Returns the fragment, unwrapped.
pub async fn handle_sanitize(Json(req): Json<SanitizeRequest>) -> Json<SanitizeResponse> {
    Json(SanitizeResponse {
        latex: sanitize(req.content.as_deref()),
    })
}
