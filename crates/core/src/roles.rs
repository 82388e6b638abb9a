//! Well-known role name constants.
//!
//! These must match the `account_role` enum values seeded in
//! `20260301000001_create_accounts_table.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PLAYER: &str = "player";
pub const ROLE_AGENT: &str = "agent";
pub const ROLE_CLUB_MANAGER: &str = "club_manager";
