//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and use the Unit of Work for repository access
//! and transaction management.

mod application_service;
mod auth_service;
mod category_service;
mod company_service;
pub mod container;
mod job_service;
mod skill_service;
mod user_service;

pub use application_service::{ApplicationManager, ApplicationService};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use category_service::{CategoryManager, CategoryService};
pub use company_service::{CompanyManager, CompanyService};
pub use container::Services;
pub use job_service::{JobManager, JobService};
pub use skill_service::{SkillManager, SkillService};
pub use user_service::{UserManager, UserService};

use crate::domain::Actor;
use crate::errors::{AppError, AppResult};
use uuid::Uuid;

/// Cross-cutting ownership guard, evaluated once per operation at the
/// service boundary. Admins pass every ownership check.
pub(crate) fn ensure_owner(actor: &Actor, owner_id: Uuid) -> AppResult<()> {
    if actor.id == owner_id || actor.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
