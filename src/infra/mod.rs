//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and migrations
//! - Repositories
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    ApplicationRepository, ApplicationStore, CategoryRepository, CategoryStore, CompanyRepository,
    CompanyStore, JobRepository, JobStore, SkillRepository, SkillStore, UserRepository, UserStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxJobRepository, TxUserRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockApplicationRepository, MockCategoryRepository, MockCompanyRepository, MockJobRepository,
    MockSkillRepository, MockUserRepository,
};
