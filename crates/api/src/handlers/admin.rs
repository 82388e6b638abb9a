//! Handlers for the `/admin/accounts` resource.
//!
//! All reads require an admin session; all mutations additionally consume
//! a CSRF token via [`CsrfProtected`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use fasl_core::error::CoreError;
use fasl_core::types::DbId;
use fasl_core::validation::{is_valid_phone, normalize_optional};
use fasl_db::models::account::{AccountResponse, AgentSummary, UpdateAccount};
use fasl_db::provisioning::{self, NewAccount, RoleProfile, RoleProfileInput};
use fasl_db::repositories::{AccountRepo, SessionRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{flatten_validation_errors, AppError, AppResult};
use crate::middleware::csrf::CsrfProtected;
use crate::middleware::rbac::{ensure_admin, RequireAdmin};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/accounts`.
///
/// The role and its profile fields arrive flattened alongside the account
/// fields; the `role` discriminator picks the [`RoleProfileInput`] variant.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 3, max = 50, message = "must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 2, message = "must be at least 2 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "must be at least 2 characters"))]
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(flatten)]
    pub profile: RoleProfileInput,
}

/// Request body for `PUT /admin/accounts/{id}`.
///
/// Every field is optional; supplied fields must still satisfy the same
/// rules as at creation time. The role and password are deliberately
/// absent (see [`UpdateAccount`]).
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 3, max = 50, message = "must be 3-50 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 2, message = "must be at least 2 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, message = "must be at least 2 characters"))]
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /admin/accounts/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

/// Response body for `GET /admin/accounts/{id}`: the account plus its
/// role profile (absent for admins).
#[derive(Debug, Serialize)]
pub struct AccountDetailResponse {
    #[serde(flatten)]
    pub account: AccountResponse,
    pub profile: Option<RoleProfile>,
}

/// Bounds checks on the role-specific profile fields, mirroring the table
/// constraints so a bad value fails as a validation error instead of
/// aborting the provisioning transaction.
fn profile_violations(profile: &RoleProfileInput) -> Vec<String> {
    let mut violations = Vec::new();
    match profile {
        RoleProfileInput::Player(player) => {
            if player.height.is_some_and(|h| h <= 0.0) {
                violations.push("height: must be greater than zero".to_string());
            }
            if player.weight.is_some_and(|w| w <= 0.0) {
                violations.push("weight: must be greater than zero".to_string());
            }
        }
        RoleProfileInput::Agent(agent) => {
            if agent.years_experience < 0 {
                violations.push("years_experience: must not be negative".to_string());
            }
        }
        RoleProfileInput::Admin | RoleProfileInput::ClubManager(_) => {}
    }
    violations
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/accounts
///
/// Provision a new account together with its role profile. Returns 201
/// with the created account.
pub async fn create_account(
    State(state): State<AppState>,
    CsrfProtected(ctx): CsrfProtected,
    Json(input): Json<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    ensure_admin(&ctx)?;

    // 1. Field validation. Every violation is collected so the caller
    //    sees the full list in one response.
    let mut violations = match input.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => flatten_validation_errors(&errors),
    };
    if let Some(phone) = normalize_optional(input.phone.clone()) {
        if !is_valid_phone(&phone) {
            violations.push("phone: contains invalid characters".to_string());
        }
    }
    violations.extend(profile_violations(&input.profile));
    if !violations.is_empty() {
        violations.sort();
        return Err(AppError::Core(CoreError::Validation(violations)));
    }

    // 2. Hash the password before it crosses into the db layer.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // 3. Provision account + profile in one transaction.
    let account = provisioning::create_account(
        &state.pool,
        NewAccount {
            username: input.username,
            email: input.email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            address: input.address,
            date_of_birth: input.date_of_birth,
            profile: input.profile,
        },
    )
    .await?;

    tracing::info!(
        account_id = account.id,
        created_by = ctx.account_id,
        "Admin created account"
    );

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}

/// GET /api/v1/admin/accounts
///
/// List all accounts, newest first.
pub async fn list_accounts(
    State(state): State<AppState>,
    RequireAdmin(_ctx): RequireAdmin,
) -> AppResult<Json<Vec<AccountResponse>>> {
    let accounts = AccountRepo::list(&state.pool).await?;
    Ok(Json(accounts.iter().map(AccountResponse::from).collect()))
}

/// GET /api/v1/admin/accounts/{id}
///
/// Fetch one account together with its role profile.
pub async fn get_account(
    State(state): State<AppState>,
    RequireAdmin(_ctx): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<AccountDetailResponse>> {
    let account = AccountRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "account",
            id,
        })?;

    let profile = provisioning::fetch_role_profile(&state.pool, &account).await?;

    Ok(Json(AccountDetailResponse {
        account: AccountResponse::from(&account),
        profile,
    }))
}

/// PUT /api/v1/admin/accounts/{id}
///
/// Partially update an account. The role is immutable and the password is
/// never touched here; blank optional fields are treated as "no change".
pub async fn update_account(
    State(state): State<AppState>,
    CsrfProtected(ctx): CsrfProtected,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAccountRequest>,
) -> AppResult<Json<AccountResponse>> {
    ensure_admin(&ctx)?;

    // Supplied fields must satisfy the same rules as at creation time;
    // COALESCE must never be handed a value the constraints forbid.
    let mut violations = match input.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => flatten_validation_errors(&errors),
    };
    let phone = normalize_optional(input.phone);
    if let Some(phone) = &phone {
        if !is_valid_phone(phone) {
            violations.push("phone: contains invalid characters".to_string());
        }
    }
    if !violations.is_empty() {
        violations.sort();
        return Err(AppError::Core(CoreError::Validation(violations)));
    }

    let update = UpdateAccount {
        username: input.username,
        email: input.email,
        first_name: input.first_name,
        last_name: input.last_name,
        phone,
        address: normalize_optional(input.address),
        date_of_birth: input.date_of_birth,
        is_active: input.is_active,
    };

    let account = AccountRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "account",
            id,
        })?;

    Ok(Json(AccountResponse::from(&account)))
}

/// DELETE /api/v1/admin/accounts/{id}
///
/// Hard-delete an account; its profile and sessions cascade. Admins
/// cannot delete themselves. Returns 204.
pub async fn delete_account(
    State(state): State<AppState>,
    CsrfProtected(ctx): CsrfProtected,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_admin(&ctx)?;

    provisioning::delete_account(&state.pool, id, ctx.account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/accounts/{id}/reset-password
///
/// Replace an account's password and revoke its live sessions. Returns 204.
pub async fn reset_password(
    State(state): State<AppState>,
    CsrfProtected(ctx): CsrfProtected,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    ensure_admin(&ctx)?;

    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(vec![format!("password: {msg}")])))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = AccountRepo::update_password(&state.pool, id, &password_hash).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "account",
            id,
        }));
    }

    // A reset invalidates every live session of that account.
    let revoked = SessionRepo::delete_all_for_account(&state.pool, id).await?;
    tracing::info!(
        account_id = id,
        reset_by = ctx.account_id,
        sessions_revoked = revoked,
        "Password reset"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/agents
///
/// Abbreviated list of active agents, for assigning an agent to a player.
pub async fn list_agents(
    State(state): State<AppState>,
    RequireAdmin(_ctx): RequireAdmin,
) -> AppResult<Json<Vec<AgentSummary>>> {
    let agents = AccountRepo::list_agents(&state.pool).await?;
    Ok(Json(agents))
}
