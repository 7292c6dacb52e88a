//! Service container - centralized service construction and access.

use std::sync::Arc;

use super::{
    ApplicationManager, ApplicationService, AuthService, Authenticator, CategoryManager,
    CategoryService, CompanyManager, CompanyService, JobManager, JobService, SkillManager,
    SkillService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::Persistence;

/// Concrete service container wiring every service to one Unit of Work.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    job_service: Arc<dyn JobService>,
    company_service: Arc<dyn CompanyService>,
    application_service: Arc<dyn ApplicationService>,
    category_service: Arc<dyn CategoryService>,
    skill_service: Arc<dyn SkillService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    /// Build all services from a database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            job_service: Arc::new(JobManager::new(uow.clone())),
            company_service: Arc::new(CompanyManager::new(uow.clone())),
            application_service: Arc::new(ApplicationManager::new(uow.clone())),
            category_service: Arc::new(CategoryManager::new(uow.clone())),
            skill_service: Arc::new(SkillManager::new(uow.clone())),
            user_service: Arc::new(UserManager::new(uow)),
        }
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    pub fn jobs(&self) -> Arc<dyn JobService> {
        self.job_service.clone()
    }

    pub fn companies(&self) -> Arc<dyn CompanyService> {
        self.company_service.clone()
    }

    pub fn applications(&self) -> Arc<dyn ApplicationService> {
        self.application_service.clone()
    }

    pub fn categories(&self) -> Arc<dyn CategoryService> {
        self.category_service.clone()
    }

    pub fn skills(&self) -> Arc<dyn SkillService> {
        self.skill_service.clone()
    }

    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}
