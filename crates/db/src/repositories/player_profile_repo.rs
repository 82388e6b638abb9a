//! Repository for the `player_profiles` table.

use fasl_core::types::DbId;
use sqlx::PgPool;

use crate::models::player::PlayerProfile;

pub(crate) const COLUMNS: &str =
    "id, account_id, position, height, weight, preferred_foot, current_club, \
     agent_id, video_url, stats, created_at, updated_at";

/// Read access to player profiles. Inserts happen inside the account
/// provisioning transaction, not here.
pub struct PlayerProfileRepo;

impl PlayerProfileRepo {
    /// Find the profile belonging to an account, if any.
    pub async fn find_by_account_id(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Option<PlayerProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM player_profiles WHERE account_id = $1");
        sqlx::query_as::<_, PlayerProfile>(&query)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }
}
