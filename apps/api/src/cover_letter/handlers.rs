//! Axum route handler for the Cover Letter API.

use axum::{extract::State, Json};

use crate::cover_letter::generator::{CoverLetter, CoverLetterEngine, CoverLetterRequest};
use crate::errors::{AppError, AppJson};
use crate::state::AppState;

/// POST /api/v1/cover-letters/generate
///
/// Always returns a letter: backend output when available, otherwise the
/// template letter with `usedFallback: true`.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    AppJson(request): AppJson<CoverLetterRequest>,
) -> Result<Json<CoverLetter>, AppError> {
    let letter = CoverLetterEngine::new(&state.ai)
        .generate_cover_letter(&request)
        .await;
    Ok(Json(letter))
}
