//! Account entity model and DTOs.

use chrono::NaiveDate;
use fasl_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The four account roles. Stored as the `account_role` Postgres enum.
///
/// The role decides which profile table must hold exactly one matching
/// row: admin has none, the other three each have exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "account_role", rename_all = "snake_case")]
pub enum Role {
    Admin,
    Player,
    Agent,
    ClubManager,
}

impl Role {
    /// The wire/storage name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => fasl_core::roles::ROLE_ADMIN,
            Role::Player => fasl_core::roles::ROLE_PLAYER,
            Role::Agent => fasl_core::roles::ROLE_AGENT,
            Role::ClubManager => fasl_core::roles::ROLE_CLUB_MANAGER,
        }
    }
}

/// Full account row from the `accounts` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`AccountResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe account representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            role: account.role,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            phone: account.phone.clone(),
            address: account.address.clone(),
            date_of_birth: account.date_of_birth,
            is_active: account.is_active,
            created_at: account.created_at,
        }
    }
}

/// DTO for updating an existing account. Only non-`None` fields are applied.
///
/// The role is deliberately absent: changing it would leave the account's
/// profile row mismatched. The password is also absent -- resetting it is
/// an explicit separate operation, so updates never re-hash the secret.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccount {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

/// Abbreviated listing of an agent account, for the "assign agent" picker.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AgentSummary {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
}
