//! Repository for the `sessions` table.

use fasl_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, Session};

const COLUMNS: &str = "id, account_id, token_hash, csrf_token, expires_at, created_at";

/// Server-side session storage. Bearer tokens are looked up by their
/// SHA-256 digest; the plaintext never reaches the database.
pub struct SessionRepo;

impl SessionRepo {
    /// Persist a new session.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (account_id, token_hash, csrf_token, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.account_id)
            .bind(&input.token_hash)
            .bind(&input.csrf_token)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Look up a session by token digest, ignoring expired rows.
    pub async fn find_valid_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM sessions WHERE token_hash = $1 AND expires_at > NOW()");
        sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Atomically consume a CSRF token: the swap only succeeds when the
    /// presented token matches the stored one, so a token can be spent
    /// exactly once.
    ///
    /// Returns `true` if the token matched and was replaced.
    pub async fn consume_csrf(
        pool: &PgPool,
        session_id: DbId,
        presented: &str,
        replacement: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE sessions SET csrf_token = $2 WHERE id = $1 AND csrf_token = $3")
                .bind(session_id)
                .bind(replacement)
                .bind(presented)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unconditionally replace the session's CSRF token, e.g. when a
    /// protected form is (re-)rendered.
    pub async fn rotate_csrf(
        pool: &PgPool,
        session_id: DbId,
        replacement: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE sessions SET csrf_token = $2 WHERE id = $1")
            .bind(session_id)
            .bind(replacement)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Destroy one session. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, session_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(session_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Destroy every session belonging to an account, e.g. after a
    /// password reset. Returns the number of sessions removed.
    pub async fn delete_all_for_account(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE account_id = $1")
            .bind(account_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Remove expired sessions. Intended for a periodic sweep.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
