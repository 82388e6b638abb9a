//! Repository for the `club_manager_profiles` table.

use fasl_core::types::DbId;
use sqlx::PgPool;

use crate::models::club_manager::ClubManagerProfile;

pub(crate) const COLUMNS: &str =
    "id, account_id, club_name, club_location, club_level, created_at, updated_at";

/// Read access to club manager profiles. Inserts happen inside the account
/// provisioning transaction, not here.
pub struct ClubManagerProfileRepo;

impl ClubManagerProfileRepo {
    /// Find the profile belonging to an account, if any.
    pub async fn find_by_account_id(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Option<ClubManagerProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM club_manager_profiles WHERE account_id = $1");
        sqlx::query_as::<_, ClubManagerProfile>(&query)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }
}
