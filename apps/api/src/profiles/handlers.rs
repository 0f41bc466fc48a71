//! Axum route handlers for the Profiles API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::profiles::validation::validate_profile;
use crate::state::AppState;

/// Rejects profiles the builder form would not accept.
fn ensure_valid(profile: &Profile) -> Result<(), AppError> {
    let report = validate_profile(profile);
    if !report.passed {
        return Err(AppError::UnprocessableEntity(
            serde_json::to_string(&report).unwrap_or_default(),
        ));
    }
    Ok(())
}

/// GET /api/profiles
pub async fn handle_list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<Profile>>, AppError> {
    Ok(Json(state.profiles.list().await?))
}

/// GET /api/profiles/:id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, AppError> {
    let profile = state
        .profiles
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;
    Ok(Json(profile))
}

/// POST /api/profiles
///
/// Creates a profile, or replaces it when the body carries a known id.
pub async fn handle_create_profile(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<(StatusCode, Json<Profile>), AppError> {
    ensure_valid(&profile)?;
    let saved = state.profiles.upsert(profile).await?;
    info!("Saved profile {}", saved.id);
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /api/profiles/:id
///
/// The path id wins over any id in the body.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut profile): Json<Profile>,
) -> Result<Json<Profile>, AppError> {
    profile.id = id;
    ensure_valid(&profile)?;
    let saved = state.profiles.upsert(profile).await?;
    info!("Updated profile {}", saved.id);
    Ok(Json(saved))
}

/// DELETE /api/profiles
pub async fn handle_clear_profiles(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.profiles.clear().await?;
    info!("Cleared all profiles");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/profiles/:id
pub async fn handle_delete_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.profiles.delete(&id).await?;
    info!("Deleted profile {id}");
    Ok(StatusCode::NO_CONTENT)
}
