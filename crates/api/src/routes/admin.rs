//! Route definitions for the `/admin` resource (admin role required).

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /accounts                     -> list accounts
/// POST   /accounts                     -> create account (CSRF)
/// GET    /accounts/{id}                -> account + role profile
/// PUT    /accounts/{id}                -> partial update (CSRF)
/// DELETE /accounts/{id}                -> hard delete (CSRF)
/// POST   /accounts/{id}/reset-password -> reset password (CSRF)
/// GET    /agents                       -> active agent picker
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts",
            get(admin::list_accounts).post(admin::create_account),
        )
        .route(
            "/accounts/{id}",
            get(admin::get_account)
                .put(admin::update_account)
                .delete(admin::delete_account),
        )
        .route(
            "/accounts/{id}/reset-password",
            post(admin::reset_password),
        )
        .route("/agents", get(admin::list_agents))
}
