//! Admin handlers for managing the catalog.
//!
//! Every mutation runs through [`AdminEditor`] and answers with the freshly
//! refetched list so clients never patch their copy locally.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use showcase_core::admin_editor::{AdminEditor, UseCaseForm};
use showcase_core::types::DbId;
use showcase_core::use_case::UseCase;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ConfirmParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A saved use case plus the refetched catalog.
#[derive(Debug, Serialize)]
pub struct SavedUseCase {
    pub use_case: UseCase,
    pub use_cases: Vec<UseCase>,
}

#[derive(Debug, Serialize)]
pub struct UseCaseList {
    pub use_cases: Vec<UseCase>,
}

/// GET /api/v1/admin/use-cases
pub async fn list_use_cases(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog();
    let editor = AdminEditor::load(&catalog).await?;
    Ok(Json(DataResponse {
        data: editor.into_use_cases(),
    }))
}

/// POST /api/v1/admin/use-cases
pub async fn create_use_case(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<UseCaseForm>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog();
    let mut editor = AdminEditor::load(&catalog).await?;
    editor.begin_create()?;
    *editor.form_mut()? = form;
    let use_case = editor.submit().await?;

    tracing::info!(use_case_id = use_case.id, admin_id = admin.user_id, "Admin created use case");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SavedUseCase {
                use_case,
                use_cases: editor.into_use_cases(),
            },
        }),
    ))
}

/// PUT /api/v1/admin/use-cases/{id}
///
/// Full replacement of the editable fields.
pub async fn update_use_case(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(form): Json<UseCaseForm>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog();
    let mut editor = AdminEditor::load(&catalog).await?;
    editor.begin_edit(id)?;
    *editor.form_mut()? = form;
    let use_case = editor.submit().await?;

    tracing::info!(use_case_id = id, admin_id = admin.user_id, "Admin updated use case");

    Ok(Json(DataResponse {
        data: SavedUseCase {
            use_case,
            use_cases: editor.into_use_cases(),
        },
    }))
}

/// DELETE /api/v1/admin/use-cases/{id}?confirm=true
///
/// Without `confirm=true` nothing is deleted. Favorites and recent views of
/// the use case stay in place and are skipped when read.
pub async fn delete_use_case(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ConfirmParams>,
) -> AppResult<impl IntoResponse> {
    if !params.is_confirmed() {
        return Err(AppError::BadRequest(
            "Deleting a use case must be confirmed with ?confirm=true".into(),
        ));
    }

    let catalog = state.catalog();
    let mut editor = AdminEditor::load(&catalog).await?;
    let confirmation = editor.request_delete(id)?;
    editor.confirm_delete(confirmation).await?;

    tracing::info!(use_case_id = id, admin_id = admin.user_id, "Admin deleted use case");

    Ok(Json(DataResponse {
        data: UseCaseList {
            use_cases: editor.into_use_cases(),
        },
    }))
}
