//! CSRF double-check extractor for state-changing endpoints.
//!
//! Mutating endpoints require the session's current CSRF token in the
//! `X-CSRF-Token` header. The token is consumed with an atomic
//! compare-and-swap on the session row before the handler body runs, so a
//! mismatched or replayed token is rejected before any side effect. The
//! replacement token is available from `GET /auth/csrf`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fasl_core::error::CoreError;
use fasl_db::repositories::SessionRepo;

use super::auth::SessionContext;
use crate::auth::token::generate_csrf_token;
use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the CSRF token on mutating requests.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// An authenticated session whose CSRF token was presented and consumed.
pub struct CsrfProtected(pub SessionContext);

impl FromRequestParts<AppState> for CsrfProtected {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = SessionContext::from_request_parts(parts, state).await?;

        let presented = parts
            .headers
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Core(CoreError::CsrfValidationFailed))?;

        // Single-use: a successful swap retires the presented token.
        let replacement = generate_csrf_token();
        let consumed =
            SessionRepo::consume_csrf(&state.pool, ctx.session_id, presented, &replacement)
                .await?;
        if !consumed {
            tracing::warn!(
                account_id = ctx.account_id,
                session_id = ctx.session_id,
                "CSRF token mismatch"
            );
            return Err(AppError::Core(CoreError::CsrfValidationFailed));
        }

        Ok(CsrfProtected(ctx))
    }
}
