//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod application;
pub mod category;
pub mod company;
pub mod job;
pub mod job_skill;
pub mod skill;
pub mod user;
pub mod user_skill;
