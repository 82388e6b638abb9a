//! Multi-table account provisioning.
//!
//! Creating an account for a profiled role (player, agent, club manager)
//! touches two tables. Both inserts run inside one transaction so a
//! failed profile insert leaves no orphaned account behind; admins get
//! no profile row at all.

use chrono::NaiveDate;
use fasl_core::error::CoreError;
use fasl_core::types::DbId;
use fasl_core::validation::normalize_optional;
use serde::Deserialize;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::account::{Account, Role};
use crate::models::agent::{AgentProfile, NewAgentProfile};
use crate::models::club_manager::{ClubManagerProfile, NewClubManagerProfile};
use crate::models::player::{NewPlayerProfile, PlayerProfile};
use crate::repositories::{
    account_repo, agent_profile_repo, club_manager_profile_repo, player_profile_repo, AccountRepo,
    AgentProfileRepo, ClubManagerProfileRepo, PlayerProfileRepo,
};

/// Role-specific input for provisioning, tagged by the target role.
///
/// Deserializes from a flattened request body carrying a `"role"` field,
/// so unknown roles are rejected at the deserialization boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleProfileInput {
    Admin,
    Player(NewPlayerProfile),
    Agent(NewAgentProfile),
    ClubManager(NewClubManagerProfile),
}

impl RoleProfileInput {
    pub fn role(&self) -> Role {
        match self {
            RoleProfileInput::Admin => Role::Admin,
            RoleProfileInput::Player(_) => Role::Player,
            RoleProfileInput::Agent(_) => Role::Agent,
            RoleProfileInput::ClubManager(_) => Role::ClubManager,
        }
    }
}

/// Everything needed to provision an account. The password arrives
/// already hashed; this layer never sees the plaintext.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub profile: RoleProfileInput,
}

/// The role-specific profile attached to an account, if the role has one.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(untagged)]
pub enum RoleProfile {
    Player(PlayerProfile),
    Agent(AgentProfile),
    ClubManager(ClubManagerProfile),
}

/// Create an account together with its role profile.
///
/// Steps:
/// 1. Reject usernames/emails that are already taken.
/// 2. Open a transaction and insert the account row.
/// 3. Insert the profile row matching the role (none for admin).
/// 4. Roll back on profile failure so no partial account survives.
/// 5. Commit and return the finished account.
///
/// Uniqueness is still enforced by the database constraints; the
/// pre-checks in step 1 only make the common case fail fast. A race
/// that slips past them surfaces as the same `DuplicateIdentity`.
pub async fn create_account(pool: &PgPool, input: NewAccount) -> Result<Account, CoreError> {
    // 1. Fast-path duplicate checks.
    if AccountRepo::username_exists(pool, &input.username)
        .await
        .map_err(internal)?
    {
        return Err(CoreError::DuplicateIdentity("username"));
    }
    if AccountRepo::email_exists(pool, &input.email)
        .await
        .map_err(internal)?
    {
        return Err(CoreError::DuplicateIdentity("email"));
    }

    let role = input.profile.role();

    // 2. Account row, inside the transaction.
    let mut tx = pool.begin().await.map_err(internal)?;

    let account = match insert_account(&mut tx, &input, role).await {
        Ok(account) => account,
        Err(err) => {
            let failure = classify_insert_error(err);
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "rollback failed after account insert error");
            }
            return Err(failure);
        }
    };

    // 3. Role profile row. Admins have none.
    let profile_result = match &input.profile {
        RoleProfileInput::Admin => Ok(()),
        RoleProfileInput::Player(profile) => {
            insert_player_profile(&mut tx, account.id, profile).await
        }
        RoleProfileInput::Agent(profile) => insert_agent_profile(&mut tx, account.id, profile).await,
        RoleProfileInput::ClubManager(profile) => {
            insert_club_manager_profile(&mut tx, account.id, profile).await
        }
    };

    // 4. Roll back on profile failure: the account row must not survive.
    if let Err(err) = profile_result {
        tracing::error!(
            account_id = account.id,
            role = role.as_str(),
            error = %err,
            "role profile insert failed, rolling back account"
        );
        if let Err(rollback_err) = tx.rollback().await {
            tracing::error!(error = %rollback_err, "rollback failed after profile insert error");
        }
        return Err(CoreError::RoleProfileCreationFailed(role.as_str()));
    }

    // 5. Commit.
    tx.commit().await.map_err(internal)?;

    tracing::info!(
        account_id = account.id,
        username = %account.username,
        role = role.as_str(),
        "account provisioned"
    );

    Ok(account)
}

/// Delete an account and, via cascade, its profile and sessions.
///
/// `requester_id` is the authenticated admin performing the deletion;
/// deleting one's own account is refused.
pub async fn delete_account(
    pool: &PgPool,
    id: DbId,
    requester_id: DbId,
) -> Result<(), CoreError> {
    if id == requester_id {
        return Err(CoreError::SelfDeletionForbidden);
    }

    let deleted = AccountRepo::delete(pool, id).await.map_err(internal)?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "account",
            id,
        });
    }

    tracing::info!(account_id = id, deleted_by = requester_id, "account deleted");
    Ok(())
}

/// Load the role profile belonging to an account. Admin accounts return
/// `None`; a profiled role with a missing row is a broken invariant and
/// reported as an internal error.
pub async fn fetch_role_profile(
    pool: &PgPool,
    account: &Account,
) -> Result<Option<RoleProfile>, CoreError> {
    let profile = match account.role {
        Role::Admin => None,
        Role::Player => Some(RoleProfile::Player(
            PlayerProfileRepo::find_by_account_id(pool, account.id)
                .await
                .map_err(internal)?
                .ok_or_else(|| missing_profile(account))?,
        )),
        Role::Agent => Some(RoleProfile::Agent(
            AgentProfileRepo::find_by_account_id(pool, account.id)
                .await
                .map_err(internal)?
                .ok_or_else(|| missing_profile(account))?,
        )),
        Role::ClubManager => Some(RoleProfile::ClubManager(
            ClubManagerProfileRepo::find_by_account_id(pool, account.id)
                .await
                .map_err(internal)?
                .ok_or_else(|| missing_profile(account))?,
        )),
    };
    Ok(profile)
}

// ---- transaction internals ----

async fn insert_account(
    tx: &mut Transaction<'_, Postgres>,
    input: &NewAccount,
    role: Role,
) -> Result<Account, sqlx::Error> {
    let query = format!(
        "INSERT INTO accounts
            (username, email, password_hash, role, first_name, last_name,
             phone, address, date_of_birth)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING {}",
        account_repo::COLUMNS
    );
    sqlx::query_as::<_, Account>(&query)
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(role)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(normalize_optional(input.phone.clone()))
        .bind(normalize_optional(input.address.clone()))
        .bind(input.date_of_birth)
        .fetch_one(&mut **tx)
        .await
}

async fn insert_player_profile(
    tx: &mut Transaction<'_, Postgres>,
    account_id: DbId,
    profile: &NewPlayerProfile,
) -> Result<(), sqlx::Error> {
    let query = format!(
        "INSERT INTO player_profiles
            (account_id, position, height, weight, preferred_foot,
             current_club, agent_id, video_url, stats)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING {}",
        player_profile_repo::COLUMNS
    );
    sqlx::query_as::<_, PlayerProfile>(&query)
        .bind(account_id)
        .bind(profile.position)
        .bind(profile.height)
        .bind(profile.weight)
        .bind(profile.preferred_foot)
        .bind(normalize_optional(profile.current_club.clone()))
        .bind(profile.agent_id)
        .bind(normalize_optional(profile.video_url.clone()))
        .bind(&profile.stats)
        .fetch_one(&mut **tx)
        .await?;
    Ok(())
}

async fn insert_agent_profile(
    tx: &mut Transaction<'_, Postgres>,
    account_id: DbId,
    profile: &NewAgentProfile,
) -> Result<(), sqlx::Error> {
    let query = format!(
        "INSERT INTO agent_profiles
            (account_id, license_number, years_experience, specialization)
         VALUES ($1, $2, $3, $4)
         RETURNING {}",
        agent_profile_repo::COLUMNS
    );
    sqlx::query_as::<_, AgentProfile>(&query)
        .bind(account_id)
        .bind(normalize_optional(profile.license_number.clone()))
        .bind(profile.years_experience)
        .bind(normalize_optional(profile.specialization.clone()))
        .fetch_one(&mut **tx)
        .await?;
    Ok(())
}

async fn insert_club_manager_profile(
    tx: &mut Transaction<'_, Postgres>,
    account_id: DbId,
    profile: &NewClubManagerProfile,
) -> Result<(), sqlx::Error> {
    let query = format!(
        "INSERT INTO club_manager_profiles
            (account_id, club_name, club_location, club_level)
         VALUES ($1, $2, $3, $4)
         RETURNING {}",
        club_manager_profile_repo::COLUMNS
    );
    sqlx::query_as::<_, ClubManagerProfile>(&query)
        .bind(account_id)
        .bind(normalize_optional(profile.club_name.clone()))
        .bind(normalize_optional(profile.club_location.clone()))
        .bind(profile.club_level)
        .fetch_one(&mut **tx)
        .await?;
    Ok(())
}

// ---- error classification ----

/// Map an account insert failure. A unique violation on one of the
/// `uq_accounts_*` constraints means a concurrent writer beat the
/// pre-checks; anything else is a provisioning failure.
fn classify_insert_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            return match db_err.constraint() {
                Some("uq_accounts_username") => CoreError::DuplicateIdentity("username"),
                Some("uq_accounts_email") => CoreError::DuplicateIdentity("email"),
                _ => CoreError::ProvisioningFailed,
            };
        }
    }
    tracing::error!(error = %err, "account insert failed");
    CoreError::ProvisioningFailed
}

fn internal(err: sqlx::Error) -> CoreError {
    CoreError::Internal(err.to_string())
}

fn missing_profile(account: &Account) -> CoreError {
    tracing::error!(
        account_id = account.id,
        role = account.role.as_str(),
        "account is missing its role profile row"
    );
    CoreError::Internal(format!(
        "account {} has no {} profile",
        account.id,
        account.role.as_str()
    ))
}
