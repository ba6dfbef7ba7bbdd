//! Handlers for the `/auth` resource (signup, login, refresh, logout, me).

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use showcase_core::error::CoreError;
use showcase_core::roles::ROLE_USER;
use showcase_core::session::Session;
use showcase_core::types::DbId;
use showcase_db::models::session::CreateSession;
use showcase_db::models::user::{CreateUser, UserResponse};
use showcase_db::repositories::{SessionRepo, UserRepo};
use validator::Validate;

use crate::auth::jwt::RefreshToken;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Consecutive failed sign-ins that lock an account.
const MAX_FAILED_ATTEMPTS: i32 = 5;
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by signup, login, and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: Session,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Who is asking for tokens, recorded on the refresh session.
struct ClientInfo {
    user_agent: Option<String>,
    ip_address: Option<String>,
}

impl ClientInfo {
    fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Self {
            user_agent: header(USER_AGENT.as_str()),
            ip_address: header("x-forwarded-for")
                .and_then(|chain| chain.split(',').next().map(|ip| ip.trim().to_string()))
                .filter(|ip| !ip.is_empty()),
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create a `user` account and sign it in. A taken email is a 409.
pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    let input = SignupRequest {
        email: normalize_email(&input.email),
        password: input.password,
    };
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password, state.config.min_password_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            password_hash,
            role: ROLE_USER.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User signed up");

    let client = ClientInfo::from_headers(&headers);
    let response = issue_tokens(&state, user.session(), client, None).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &normalize_email(&input.email))
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if user.locked_until.is_some_and(|until| until > Utc::now()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is temporarily locked. Try again later.".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let locked_until = UserRepo::record_failed_login(
            &state.pool,
            user.id,
            MAX_FAILED_ATTEMPTS,
            chrono::Duration::minutes(LOCK_DURATION_MINS),
        )
        .await?;
        if let Some(until) = locked_until {
            tracing::warn!(user_id = user.id, %until, "Account locked after failed logins");
        }
        return Err(invalid_credentials());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let client = ClientInfo::from_headers(&headers);
    let response = issue_tokens(&state, user.session(), client, None).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a live refresh token for a new pair. The presented token stops
/// working even if the request races with another refresh.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let presented = RefreshToken::digest(&input.refresh_token);

    let stale = SessionRepo::find_active_by_hash(&state.pool, &presented)
        .await?
        .ok_or_else(invalid_refresh_token)?;

    let user = UserRepo::find_by_id(&state.pool, stale.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let client = ClientInfo::from_headers(&headers);
    let response = issue_tokens(&state, user.session(), client, Some(stale.id)).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke every refresh session of the caller. 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, session.user_id).await?;
    tracing::info!(user_id = session.user_id, revoked, "User signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: session.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

fn invalid_refresh_token() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid or expired refresh token".into(),
    ))
}

/// Sign an access token and persist a refresh session for it.
///
/// With `replacing`, the new session is created only if that one could be
/// revoked.
async fn issue_tokens(
    state: &AppState,
    session: Session,
    client: ClientInfo,
    replacing: Option<DbId>,
) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = jwt
        .sign(&session)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let refresh = RefreshToken::generate();
    let record = CreateSession {
        user_id: session.user_id,
        refresh_token_hash: refresh.hash,
        expires_at: jwt.refresh_expires_at(Utc::now()),
        user_agent: client.user_agent,
        ip_address: client.ip_address,
    };

    match replacing {
        Some(old_id) => {
            SessionRepo::rotate(&state.pool, old_id, &record)
                .await?
                .ok_or_else(invalid_refresh_token)?;
        }
        None => {
            SessionRepo::create(&state.pool, &record).await?;
        }
    }

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: jwt.access_ttl_secs(),
        user: session,
    })
}
