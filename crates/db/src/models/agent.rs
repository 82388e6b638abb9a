//! Agent profile entity model and DTOs.

use fasl_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An agent profile row from the `agent_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AgentProfile {
    pub id: DbId,
    pub account_id: DbId,
    pub license_number: Option<String>,
    pub years_experience: i32,
    pub specialization: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Role-specific fields for creating an agent profile with its account.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAgentProfile {
    #[serde(default)]
    pub license_number: Option<String>,
    /// Non-negative; defaults to 0 when not supplied.
    #[serde(default)]
    pub years_experience: i32,
    #[serde(default)]
    pub specialization: Option<String>,
}
