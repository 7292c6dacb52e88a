//! SeaORM entity for the `skills` table.

use sea_orm::entity::prelude::*;

use crate::domain;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "skills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    /// Lowercased; uniqueness is therefore case-insensitive
    #[sea_orm(unique)]
    pub slug: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::job_skill::Entity")]
    JobSkills,
    #[sea_orm(has_many = "super::user_skill::Entity")]
    UserSkills,
}

impl Related<super::job_skill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobSkills.def()
    }
}

impl Related<super::user_skill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSkills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for domain::Skill {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            created_at: model.created_at,
        }
    }
}
