//! Handlers for consultation requests.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use showcase_core::consultation::ConsultationInput;
use showcase_db::repositories::ConsultationRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/consultations
///
/// Public intake. Fields are trimmed and validated before storage.
pub async fn create_consultation(
    State(state): State<AppState>,
    Json(input): Json<ConsultationInput>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized()?;
    let request = ConsultationRepo::create(&state.pool, &input).await?;

    tracing::info!(
        consultation_id = request.id,
        inquiry_type = %request.inquiry_type,
        "Consultation request received",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/admin/consultations
pub async fn list_consultations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests = ConsultationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: requests }))
}
