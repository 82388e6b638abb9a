//! Route definition for the public contact form.

use axum::routing::post;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes merged into `/api/v1`.
///
/// ```text
/// POST /contact -> submit contact form (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/contact", post(contact::submit))
}
