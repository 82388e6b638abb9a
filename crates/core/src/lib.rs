//! Domain types shared across the Football Agent SL backend crates.

pub mod error;
pub mod roles;
pub mod types;
pub mod validation;
