pub mod admin;
pub mod auth;
pub mod contact;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                              login (public)
/// /auth/logout                             two-step logout (requires auth)
/// /auth/session                            current session info (requires auth)
/// /auth/csrf                               rotate + fetch CSRF token (requires auth)
///
/// /admin/accounts                          list, create (admin only)
/// /admin/accounts/{id}                     get, update, delete
/// /admin/accounts/{id}/reset-password      reset password
/// /admin/agents                            active agent picker
///
/// /contact                                 public contact form (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .merge(contact::router())
}
