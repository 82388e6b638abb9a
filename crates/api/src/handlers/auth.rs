//! Handlers for the `/auth` resource (login, logout, session, csrf).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use fasl_core::error::CoreError;
use fasl_core::types::DbId;
use fasl_db::models::account::Role;
use fasl_db::models::session::CreateSession;
use fasl_db::repositories::{AccountRepo, SessionRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::{verify_password, MIN_PASSWORD_LENGTH};
use crate::auth::token::{generate_csrf_token, generate_session_token};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::SessionContext;
use crate::state::AppState;

/// Minimum username length accepted at login. Shorter input cannot match
/// any account, so it is rejected before the database lookup.
const MIN_USERNAME_LENGTH: usize = 3;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/logout`.
///
/// Logout is a two-step flow: the client first shows a confirmation and
/// only a request with `confirm: true` destroys the session.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub confirm: bool,
}

/// Successful authentication response returned by login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Opaque bearer token identifying the session.
    pub token: String,
    /// The session's initial CSRF token.
    pub csrf_token: String,
    /// Session expiry (UTC).
    pub expires_at: chrono::DateTime<Utc>,
    pub account: SessionAccount,
}

/// Public account info embedded in [`AuthResponse`] and returned by
/// `GET /auth/session`.
#[derive(Debug, Serialize)]
pub struct SessionAccount {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
}

impl From<&SessionContext> for SessionAccount {
    fn from(ctx: &SessionContext) -> Self {
        Self {
            id: ctx.account_id,
            username: ctx.username.clone(),
            email: ctx.email.clone(),
            role: ctx.role,
            first_name: ctx.first_name.clone(),
            last_name: ctx.last_name.clone(),
        }
    }
}

/// Response body for `POST /auth/logout`.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub confirmed: bool,
    pub message: &'static str,
}

/// Response body for `GET /auth/csrf`.
#[derive(Debug, Serialize)]
pub struct CsrfResponse {
    pub csrf_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns a session token and the
/// session's CSRF token. Unknown usernames, wrong passwords, and
/// deactivated accounts are indistinguishable: all return the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Cheap rejection of input that cannot match any account. Keeps
    //    the failure conflated with the other credential errors.
    if input.username.len() < MIN_USERNAME_LENGTH || input.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    // 2. Find account by username.
    let account = AccountRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::InvalidCredentials))?;

    // 3. Verify password.
    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    // 4. Deactivated accounts fail the same way as bad credentials.
    if !account.is_active {
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    // 5. Create the session.
    let (token, token_hash) = generate_session_token();
    let csrf_token = generate_csrf_token();
    let expires_at = Utc::now() + chrono::Duration::hours(state.config.session.ttl_hours);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            account_id: account.id,
            token_hash,
            csrf_token: csrf_token.clone(),
            expires_at,
        },
    )
    .await?;

    tracing::info!(account_id = account.id, username = %account.username, "Login successful");

    Ok(Json(AuthResponse {
        token,
        csrf_token,
        expires_at,
        account: SessionAccount {
            id: account.id,
            username: account.username,
            email: account.email,
            role: account.role,
            first_name: account.first_name,
            last_name: account.last_name,
        },
    }))
}

/// POST /api/v1/auth/logout
///
/// Two-step logout: `{"confirm": false}` (or an empty body) leaves the
/// session intact and reports back; `{"confirm": true}` is a mutation and
/// must pass the CSRF check before the session is destroyed.
pub async fn logout(
    State(state): State<AppState>,
    ctx: SessionContext,
    headers: axum::http::HeaderMap,
    Json(input): Json<LogoutRequest>,
) -> AppResult<Json<LogoutResponse>> {
    if !input.confirm {
        return Ok(Json(LogoutResponse {
            confirmed: false,
            message: "Logout not confirmed; session remains active",
        }));
    }

    // The destroy step is state-changing and consumes a CSRF token like
    // any other mutation. The swap is moot once the row is deleted, but
    // it rejects mismatches before the side effect.
    let presented = headers
        .get(crate::middleware::csrf::CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Core(CoreError::CsrfValidationFailed))?;
    let replacement = generate_csrf_token();
    let consumed =
        SessionRepo::consume_csrf(&state.pool, ctx.session_id, presented, &replacement).await?;
    if !consumed {
        return Err(AppError::Core(CoreError::CsrfValidationFailed));
    }

    SessionRepo::delete(&state.pool, ctx.session_id).await?;
    tracing::info!(account_id = ctx.account_id, "Logout");

    Ok(Json(LogoutResponse {
        confirmed: true,
        message: "Logged out",
    }))
}

/// GET /api/v1/auth/session
///
/// Return the authenticated account behind the presented session token.
pub async fn get_session(ctx: SessionContext) -> Json<SessionAccount> {
    Json(SessionAccount::from(&ctx))
}

/// GET /api/v1/auth/csrf
///
/// Rotate and return the session's CSRF token. Called whenever the client
/// (re-)renders a protected form; the previous token is retired.
pub async fn get_csrf(
    State(state): State<AppState>,
    ctx: SessionContext,
) -> AppResult<Json<CsrfResponse>> {
    let csrf_token = generate_csrf_token();
    SessionRepo::rotate_csrf(&state.pool, ctx.session_id, &csrf_token).await?;
    Ok(Json(CsrfResponse { csrf_token }))
}
