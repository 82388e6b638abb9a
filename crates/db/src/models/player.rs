//! Player profile entity model and DTOs.

use fasl_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// On-pitch position. Stored as the `player_position` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "player_position")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

/// Preferred foot. Stored as the `preferred_foot` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "preferred_foot")]
pub enum PreferredFoot {
    Left,
    Right,
    Both,
}

impl Default for PreferredFoot {
    fn default() -> Self {
        PreferredFoot::Right
    }
}

/// A player profile row from the `player_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlayerProfile {
    pub id: DbId,
    pub account_id: DbId,
    pub position: Position,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub preferred_foot: PreferredFoot,
    pub current_club: Option<String>,
    /// Another account with role = agent, if one is assigned.
    pub agent_id: Option<DbId>,
    pub video_url: Option<String>,
    /// Opaque structured stats blob (JSONB).
    pub stats: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Role-specific fields for creating a player profile with its account.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayerProfile {
    pub position: Position,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub preferred_foot: PreferredFoot,
    #[serde(default)]
    pub current_club: Option<String>,
    #[serde(default)]
    pub agent_id: Option<DbId>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub stats: Option<serde_json::Value>,
}
