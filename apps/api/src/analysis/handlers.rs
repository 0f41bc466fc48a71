//! Axum route handler for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::debug;

use crate::analysis::analyzer::{analyze_resume, extract_pdf_text};
use crate::errors::AppError;
use crate::models::analysis::ResumeAnalysis;
use crate::state::AppState;

/// Upload size cap for `/api/analyze-resume`.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// POST /api/analyze-resume
///
/// Multipart form: `file` (PDF) and `targetRole`.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeAnalysis>, AppError> {
    let mut file: Option<Bytes> = None;
    let mut target_role: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                debug!("Received resume upload ({} bytes)", bytes.len());
                file = Some(bytes);
            }
            Some("targetRole") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid targetRole: {e}")))?;
                target_role = Some(text.trim().to_string());
            }
            _ => {}
        }
    }

    let file = file
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
    let target_role = target_role
        .filter(|role| !role.is_empty())
        .ok_or_else(|| AppError::Validation("No target role provided".to_string()))?;

    let resume_text = extract_pdf_text(file).await?;
    let analysis = analyze_resume(
        state.llm.as_ref(),
        &state.generation,
        &resume_text,
        &target_role,
    )
    .await
    .map_err(|e| AppError::Llm(format!("Resume analysis failed: {e}")))?;

    Ok(Json(analysis))
}
