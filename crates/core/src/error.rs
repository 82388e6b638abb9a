use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Every failure here is scoped to the single request or operation that
/// produced it; nothing is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Field-level validation failures, collected rather than reported
    /// one at a time.
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// A username or email collided with an existing account. The storage
    /// unique constraint is the authoritative source of this error; the
    /// pre-insert existence checks only produce it early.
    #[error("Duplicate {0}: an account with this {0} already exists")]
    DuplicateIdentity(&'static str),

    /// The storage layer returned no identity after the account insert.
    #[error("Account provisioning failed: no account id returned")]
    ProvisioningFailed,

    /// The role profile insert failed; the enclosing transaction rolled
    /// back, so the account row did not persist either.
    #[error("Failed to create {0} profile")]
    RoleProfileCreationFailed(&'static str),

    /// Bad login. Deliberately conflates "no such user", "wrong password",
    /// and "inactive account" so callers cannot enumerate accounts.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The request's CSRF token did not match the session's current token.
    /// Fatal to the request, never retried.
    #[error("CSRF token validation failed")]
    CsrfValidationFailed,

    #[error("You cannot delete your own account")]
    SelfDeletionForbidden,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
