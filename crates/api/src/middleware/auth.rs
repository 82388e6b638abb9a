//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fasl_core::error::CoreError;
use fasl_core::types::DbId;
use fasl_db::models::account::Role;
use fasl_db::repositories::{AccountRepo, SessionRepo};

use crate::auth::token::hash_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated session extracted from an opaque Bearer token in the
/// `Authorization` header.
///
/// The token is hashed and looked up in the `sessions` table; expired
/// sessions and deactivated accounts are rejected. Use this as an
/// extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(ctx: SessionContext) -> AppResult<Json<()>> {
///     tracing::info!(account_id = ctx.account_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// The session row id, used for CSRF bookkeeping and logout.
    pub session_id: DbId,
    /// The authenticated account's internal database id.
    pub account_id: DbId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
}

impl FromRequestParts<AppState> for SessionContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let token_hash = hash_session_token(token);
        let session = SessionRepo::find_valid_by_token_hash(&state.pool, &token_hash)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
            })?;

        let account = AccountRepo::find_by_id(&state.pool, session.account_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Account no longer exists".into()))
            })?;

        // Deactivation takes effect immediately, even for live sessions.
        if !account.is_active {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid or expired session".into(),
            )));
        }

        Ok(SessionContext {
            session_id: session.id,
            account_id: account.id,
            username: account.username,
            email: account.email,
            role: account.role,
            first_name: account.first_name,
            last_name: account.last_name,
        })
    }
}
