//! Role-based access control (RBAC) extractors.
//!
//! [`RequireAdmin`] wraps [`SessionContext`] and rejects requests whose
//! role does not meet the requirement, enforcing authorization at the
//! type level. Handlers that also consume a CSRF token call
//! [`ensure_admin`] after the [`CsrfProtected`](super::csrf::CsrfProtected)
//! extractor instead.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fasl_core::error::CoreError;
use fasl_db::models::account::Role;

use super::auth::SessionContext;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(ctx): RequireAdmin) -> AppResult<Json<()>> {
///     // ctx is guaranteed to belong to an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub SessionContext);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = SessionContext::from_request_parts(parts, state).await?;
        ensure_admin(&ctx)?;
        Ok(RequireAdmin(ctx))
    }
}

/// Reject non-admin sessions. Shared by [`RequireAdmin`] and the
/// CSRF-protected admin handlers.
pub fn ensure_admin(ctx: &SessionContext) -> Result<(), AppError> {
    if ctx.role != Role::Admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin role required".into(),
        )));
    }
    Ok(())
}
