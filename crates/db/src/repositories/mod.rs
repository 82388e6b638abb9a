pub mod account_repo;
pub mod agent_profile_repo;
pub mod club_manager_profile_repo;
pub mod player_profile_repo;
pub mod session_repo;

pub use account_repo::AccountRepo;
pub use agent_profile_repo::AgentProfileRepo;
pub use club_manager_profile_repo::ClubManagerProfileRepo;
pub use player_profile_repo::PlayerProfileRepo;
pub use session_repo::SessionRepo;
