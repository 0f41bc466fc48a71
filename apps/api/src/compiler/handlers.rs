//! Axum route handler for the Compile API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompileRequest {
    #[serde(default)]
    pub latex: String,
}

/// POST /api/compile-latex
///
/// Compiles a complete LaTeX document and streams back the PDF inline.
pub async fn handle_compile_latex(
    State(state): State<AppState>,
    Json(request): Json<CompileRequest>,
) -> Result<Response, AppError> {
    if request.latex.trim().is_empty() {
        return Err(AppError::Validation("No LaTeX provided".to_string()));
    }

    let pdf = state.compiler.compile(&request.latex).await?;
    info!("Compiled resume PDF ({} bytes)", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "inline; filename=\"resume.pdf\""),
        ],
        pdf,
    )
        .into_response())
}
