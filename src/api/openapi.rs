//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    application_handler, auth_handler, category_handler, company_handler, job_handler,
    skill_handler, user_handler,
};
use crate::domain::{
    ApplicationResponse, ApplicationStatus, CategoryResponse, CompanyResponse, CompanySize,
    CreateApplication, CreateCompany, CreateJob, CreateNamed, ExperienceLevel, Job, JobDetail,
    JobSkill, JobSkillDetail, JobStats, JobStatus, JobSummary, JobType, Proficiency,
    SkillResponse, UpdateCompany, UpdateJob, UserResponse, UserRole, UserSkill,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the Job Board API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Job Board API",
        version = "0.1.0",
        description = "Job board backend with search, companies, applications and reference data",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Job endpoints
        job_handler::search_jobs,
        job_handler::get_job,
        job_handler::create_job,
        job_handler::update_job,
        job_handler::publish_job,
        job_handler::close_job,
        job_handler::delete_job,
        job_handler::list_my_jobs,
        job_handler::job_stats,
        // Application endpoints
        application_handler::apply_to_job,
        application_handler::my_applications,
        application_handler::list_job_applications,
        application_handler::update_application_status,
        // Company endpoints
        company_handler::list_companies,
        company_handler::get_company,
        company_handler::create_company,
        company_handler::update_company,
        company_handler::delete_company,
        // Reference data endpoints
        category_handler::list_categories,
        category_handler::create_category,
        category_handler::update_category,
        category_handler::delete_category,
        skill_handler::list_skills,
        skill_handler::create_skill,
        skill_handler::delete_skill,
        // User endpoints
        user_handler::get_profile,
        user_handler::update_profile,
        user_handler::get_skills,
        user_handler::replace_skills,
        user_handler::deactivate_account,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            JobType,
            ExperienceLevel,
            JobStatus,
            Job,
            JobSkill,
            JobSkillDetail,
            JobSummary,
            JobDetail,
            JobStats,
            CreateJob,
            UpdateJob,
            ApplicationStatus,
            ApplicationResponse,
            CreateApplication,
            CompanySize,
            CompanyResponse,
            CreateCompany,
            UpdateCompany,
            CategoryResponse,
            SkillResponse,
            CreateNamed,
            Proficiency,
            UserSkill,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            // Handler request types
            application_handler::StatusUpdateRequest,
            user_handler::UpdateProfileRequest,
            user_handler::ReplaceSkillsRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Jobs", description = "Job search and posting lifecycle"),
        (name = "Applications", description = "Job applications and review"),
        (name = "Companies", description = "Company profiles"),
        (name = "Reference data", description = "Categories and skills"),
        (name = "Users", description = "Profile management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
