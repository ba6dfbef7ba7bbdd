use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use showcase_core::error::CoreError;
use showcase_core::store::BackendError;

const INTERNAL_MESSAGE: &str = "An internal error occurred";
const UNAVAILABLE_MESSAGE: &str = "The catalog is temporarily unavailable";

/// Error type returned by every handler and extractor.
///
/// Renders as `{ "error": <message>, "code": <CODE> }`. Causes that could
/// leak internals (database errors, backend failures) are logged and replaced
/// with a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Raised by repositories used directly from handlers (auth, intake).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        AppError::Core(CoreError::Backend(err))
    }
}

/// Status, machine-readable code and client-facing message.
struct Rendered(StatusCode, &'static str, String);

impl Rendered {
    fn internal() -> Self {
        Rendered(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            INTERNAL_MESSAGE.to_string(),
        )
    }

    fn unavailable() -> Self {
        Rendered(
            StatusCode::SERVICE_UNAVAILABLE,
            "BACKEND_ERROR",
            UNAVAILABLE_MESSAGE.to_string(),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let Rendered(status, code, message) = match self {
            AppError::Core(core) => render_core(core),
            AppError::Database(err) => render_sqlx(&err),
            AppError::BadRequest(msg) => Rendered(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                Rendered::internal()
            }
        };

        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}

fn render_core(err: CoreError) -> Rendered {
    match err {
        CoreError::NotFound { entity, id } => Rendered(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => Rendered(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
        CoreError::Conflict(msg) => Rendered(StatusCode::CONFLICT, "CONFLICT", msg),
        CoreError::Unauthorized(msg) => Rendered(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
        CoreError::Forbidden(msg) => Rendered(StatusCode::FORBIDDEN, "FORBIDDEN", msg),
        CoreError::Backend(err) => {
            tracing::error!(cause = %err.cause, "Backend call failed");
            Rendered::unavailable()
        }
    }
}

/// `RowNotFound` is 404, a `uq_*` unique violation is 409, losing the
/// database connection is 503 like any other backend failure.
fn render_sqlx(err: &sqlx::Error) -> Rendered {
    match err {
        sqlx::Error::RowNotFound => Rendered(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation()
                && db_err.constraint().is_some_and(|c| c.starts_with("uq_")) =>
        {
            let constraint = db_err.constraint().unwrap_or_default();
            Rendered(StatusCode::CONFLICT, "CONFLICT", conflict_message(constraint))
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => {
            tracing::error!(error = %err, "Database unavailable");
            Rendered::unavailable()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            Rendered::internal()
        }
    }
}

fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_users_email" => "An account with this email already exists".to_string(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}
