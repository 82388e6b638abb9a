//! Repository for the `agent_profiles` table.

use fasl_core::types::DbId;
use sqlx::PgPool;

use crate::models::agent::AgentProfile;

pub(crate) const COLUMNS: &str =
    "id, account_id, license_number, years_experience, specialization, created_at, updated_at";

/// Read access to agent profiles. Inserts happen inside the account
/// provisioning transaction, not here.
pub struct AgentProfileRepo;

impl AgentProfileRepo {
    /// Find the profile belonging to an account, if any.
    pub async fn find_by_account_id(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Option<AgentProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agent_profiles WHERE account_id = $1");
        sqlx::query_as::<_, AgentProfile>(&query)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }
}
