//! Session model and DTOs.

use fasl_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table.
///
/// The bearer token itself is never stored; `token_hash` is its SHA-256
/// hex digest. `csrf_token` is the session's current single-use token.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub account_id: DbId,
    pub token_hash: String,
    pub csrf_token: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub account_id: DbId,
    pub token_hash: String,
    pub csrf_token: String,
    pub expires_at: Timestamp,
}
