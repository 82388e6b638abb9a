//! Club manager profile entity model and DTOs.

use fasl_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Competitive level of the managed club. Stored as the `club_level`
/// Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "club_level")]
pub enum ClubLevel {
    Local,
    National,
    International,
}

impl Default for ClubLevel {
    fn default() -> Self {
        ClubLevel::Local
    }
}

/// A club manager profile row from the `club_manager_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClubManagerProfile {
    pub id: DbId,
    pub account_id: DbId,
    pub club_name: Option<String>,
    pub club_location: Option<String>,
    pub club_level: ClubLevel,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Role-specific fields for creating a club manager profile with its account.
#[derive(Debug, Clone, Deserialize)]
pub struct NewClubManagerProfile {
    #[serde(default)]
    pub club_name: Option<String>,
    #[serde(default)]
    pub club_location: Option<String>,
    #[serde(default)]
    pub club_level: ClubLevel,
}
