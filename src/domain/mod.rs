//! Core business entities and logic.
//!
//! Domain types are storage-agnostic; SeaORM entities live in
//! `infra::repositories::entities` and convert into these.

mod application;
mod company;
mod job;
mod password;
mod taxonomy;
mod user;

pub use application::{Application, ApplicationResponse, ApplicationStatus, CreateApplication};
pub use company::{Company, CompanyResponse, CompanySize, CreateCompany, UpdateCompany};
pub use job::{
    CreateJob, ExperienceLevel, Job, JobDetail, JobSkill, JobSkillDetail, JobStats, JobStatus,
    JobSummary, JobType, UpdateJob,
};
pub use password::Password;
pub use taxonomy::{
    slugify, Category, CategoryResponse, CreateNamed, Proficiency, Skill, SkillResponse, UserSkill,
};
pub use user::{Actor, UpdateProfile, User, UserResponse, UserRole};
