//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login    -> login
/// POST /logout   -> logout (requires auth, two-step confirm)
/// GET  /session  -> current session info (requires auth)
/// GET  /csrf     -> rotate + fetch CSRF token (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/session", get(auth::get_session))
        .route("/csrf", get(auth::get_csrf))
}
