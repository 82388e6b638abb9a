pub mod account;
pub mod agent;
pub mod club_manager;
pub mod player;
pub mod session;
