//! SeaORM entity for the `jobs` table.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub requirements: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub responsibilities: Option<String>,
    pub job_type: String,
    pub experience_level: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub currency: Option<String>,
    pub location: Option<String>,
    pub is_remote: bool,
    pub application_email: Option<String>,
    pub application_url: Option<String>,
    pub status: String,
    pub expires_at: Option<DateTimeUtc>,
    pub company_id: Uuid,
    pub posted_by: Uuid,
    pub category_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::PostedBy",
        to = "super::user::Column::Id"
    )]
    Poster,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::application::Entity")]
    Applications,
    #[sea_orm(has_many = "super::job_skill::Entity")]
    JobSkills,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Poster.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::job_skill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobSkills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for domain::Job {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            requirements: model.requirements,
            responsibilities: model.responsibilities,
            job_type: domain::JobType::from(model.job_type.as_str()),
            experience_level: domain::ExperienceLevel::from(model.experience_level.as_str()),
            salary_min: model.salary_min,
            salary_max: model.salary_max,
            currency: model.currency,
            location: model.location,
            is_remote: model.is_remote,
            application_email: model.application_email,
            application_url: model.application_url,
            status: domain::JobStatus::from(model.status.as_str()),
            expires_at: model.expires_at,
            company_id: model.company_id,
            posted_by: model.posted_by,
            category_id: model.category_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

// Full-row active model for inserts and updates driven by the domain value
impl From<&domain::Job> for ActiveModel {
    fn from(job: &domain::Job) -> Self {
        ActiveModel {
            id: Set(job.id),
            title: Set(job.title.clone()),
            description: Set(job.description.clone()),
            requirements: Set(job.requirements.clone()),
            responsibilities: Set(job.responsibilities.clone()),
            job_type: Set(job.job_type.to_string()),
            experience_level: Set(job.experience_level.to_string()),
            salary_min: Set(job.salary_min),
            salary_max: Set(job.salary_max),
            currency: Set(job.currency.clone()),
            location: Set(job.location.clone()),
            is_remote: Set(job.is_remote),
            application_email: Set(job.application_email.clone()),
            application_url: Set(job.application_url.clone()),
            status: Set(job.status.to_string()),
            expires_at: Set(job.expires_at),
            company_id: Set(job.company_id),
            posted_by: Set(job.posted_by),
            category_id: Set(job.category_id),
            created_at: Set(job.created_at),
            updated_at: Set(Utc::now()),
        }
    }
}

/// Summary projection used by list and search endpoints
pub fn to_summary(model: Model, company_name: Option<String>) -> domain::JobSummary {
    domain::JobSummary {
        id: model.id,
        title: model.title,
        job_type: model.job_type,
        experience_level: model.experience_level,
        salary_min: model.salary_min,
        salary_max: model.salary_max,
        currency: model.currency,
        location: model.location,
        is_remote: model.is_remote,
        status: model.status,
        company_id: model.company_id,
        company_name,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}
