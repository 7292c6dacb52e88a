//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{
    ApplicationService, AuthService, CategoryService, CompanyService, JobService, Services,
    SkillService, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub job_service: Arc<dyn JobService>,
    pub company_service: Arc<dyn CompanyService>,
    pub application_service: Arc<dyn ApplicationService>,
    pub category_service: Arc<dyn CategoryService>,
    pub skill_service: Arc<dyn SkillService>,
    pub user_service: Arc<dyn UserService>,
    /// Database gateway, kept for health checks
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a connected database and config.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: services.auth(),
            job_service: services.jobs(),
            company_service: services.companies(),
            application_service: services.applications(),
            category_service: services.categories(),
            skill_service: services.skills(),
            user_service: services.users(),
            database,
        }
    }
}
