//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod application_repository;
mod category_repository;
mod company_repository;
pub(crate) mod entities;
mod job_repository;
mod skill_repository;
mod user_repository;

pub use application_repository::{ApplicationRepository, ApplicationStore};
pub use category_repository::{CategoryRepository, CategoryStore};
pub use company_repository::{CompanyRepository, CompanyStore};
pub use job_repository::{JobRepository, JobStore};
pub use skill_repository::{SkillRepository, SkillStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use application_repository::MockApplicationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use category_repository::MockCategoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use company_repository::MockCompanyRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use job_repository::MockJobRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use skill_repository::MockSkillRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
