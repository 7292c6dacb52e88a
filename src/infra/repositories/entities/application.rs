//! SeaORM entity for the `applications` table.

use sea_orm::entity::prelude::*;

use crate::domain;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// (job_id, applicant_id) carries a unique constraint: the
    /// authoritative one-application-per-job guard
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub applied_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job::Entity",
        from = "Column::JobId",
        to = "super::job::Column::Id"
    )]
    Job,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ApplicantId",
        to = "super::user::Column::Id"
    )]
    Applicant,
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applicant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for domain::Application {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            job_id: model.job_id,
            applicant_id: model.applicant_id,
            status: domain::ApplicationStatus::from(model.status.as_str()),
            cover_letter: model.cover_letter,
            resume_url: model.resume_url,
            applied_at: model.applied_at,
            updated_at: model.updated_at,
        }
    }
}
