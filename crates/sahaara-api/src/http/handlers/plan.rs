//! Safety plan document download handler.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /api/v1/chat/session/{id}/safety-plan - Download the rendered plan.
///
/// Returns the PDF generated during the session's interview turns, or 404
/// if the session never reached the interview specialist.
pub async fn download_safety_plan(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let bytes = state
        .engine
        .safety_plan_pdf(&session_id)
        .ok_or(AppError::PlanNotFound)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"safety_plan.pdf\"",
            ),
        ],
        bytes,
    )
        .into_response())
}
