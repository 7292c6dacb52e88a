//! Migration: create the core job-board tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .col(
                        ColumnDef::new(Companies::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Companies::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Companies::Description).text().null())
                    .col(ColumnDef::new(Companies::Website).string().null())
                    .col(ColumnDef::new(Companies::Industry).string().null())
                    .col(ColumnDef::new(Companies::Size).string().null())
                    .col(ColumnDef::new(Companies::Location).string().null())
                    .col(ColumnDef::new(Companies::FoundedAt).date().null())
                    .col(
                        ColumnDef::new(Companies::OwnerId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Companies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Companies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companies_owner")
                            .from(Companies::Table, Companies::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .col(
                        ColumnDef::new(Categories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(
                        ColumnDef::new(Categories::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Categories::Description).text().null())
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Skills::Table)
                    .col(ColumnDef::new(Skills::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Skills::Name).string().not_null())
                    .col(
                        ColumnDef::new(Skills::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Skills::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Jobs::Table)
                    .col(ColumnDef::new(Jobs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Jobs::Title).string().not_null())
                    .col(ColumnDef::new(Jobs::Description).text().not_null())
                    .col(ColumnDef::new(Jobs::Requirements).text().null())
                    .col(ColumnDef::new(Jobs::Responsibilities).text().null())
                    .col(ColumnDef::new(Jobs::JobType).string().not_null())
                    .col(ColumnDef::new(Jobs::ExperienceLevel).string().not_null())
                    .col(ColumnDef::new(Jobs::SalaryMin).big_integer().null())
                    .col(ColumnDef::new(Jobs::SalaryMax).big_integer().null())
                    .col(ColumnDef::new(Jobs::Currency).string().null())
                    .col(ColumnDef::new(Jobs::Location).string().null())
                    .col(
                        ColumnDef::new(Jobs::IsRemote)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Jobs::ApplicationEmail).string().null())
                    .col(ColumnDef::new(Jobs::ApplicationUrl).string().null())
                    .col(ColumnDef::new(Jobs::Status).string().not_null())
                    .col(
                        ColumnDef::new(Jobs::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Jobs::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Jobs::PostedBy).uuid().not_null())
                    .col(ColumnDef::new(Jobs::CategoryId).uuid().null())
                    .col(
                        ColumnDef::new(Jobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Jobs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobs_company")
                            .from(Jobs::Table, Jobs::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobs_poster")
                            .from(Jobs::Table, Jobs::PostedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobs_category")
                            .from(Jobs::Table, Jobs::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Serves the always-applied published-and-not-expired clause
        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_status_expires_at")
                    .table(Jobs::Table)
                    .col(Jobs::Status)
                    .col(Jobs::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_company_id")
                    .table(Jobs::Table)
                    .col(Jobs::CompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .col(
                        ColumnDef::new(Applications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Applications::JobId).uuid().not_null())
                    .col(ColumnDef::new(Applications::ApplicantId).uuid().not_null())
                    .col(ColumnDef::new(Applications::Status).string().not_null())
                    .col(ColumnDef::new(Applications::CoverLetter).text().null())
                    .col(ColumnDef::new(Applications::ResumeUrl).string().null())
                    .col(
                        ColumnDef::new(Applications::AppliedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Applications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_job")
                            .from(Applications::Table, Applications::JobId)
                            .to(Jobs::Table, Jobs::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_applicant")
                            .from(Applications::Table, Applications::ApplicantId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // The authoritative one-application-per-job guard
        manager
            .create_index(
                Index::create()
                    .name("uq_applications_job_applicant")
                    .table(Applications::Table)
                    .col(Applications::JobId)
                    .col(Applications::ApplicantId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JobSkills::Table)
                    .col(ColumnDef::new(JobSkills::JobId).uuid().not_null())
                    .col(ColumnDef::new(JobSkills::SkillId).uuid().not_null())
                    .col(
                        ColumnDef::new(JobSkills::IsRequired)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .primary_key(
                        Index::create()
                            .col(JobSkills::JobId)
                            .col(JobSkills::SkillId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_skills_job")
                            .from(JobSkills::Table, JobSkills::JobId)
                            .to(Jobs::Table, Jobs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_skills_skill")
                            .from(JobSkills::Table, JobSkills::SkillId)
                            .to(Skills::Table, Skills::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserSkills::Table)
                    .col(ColumnDef::new(UserSkills::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserSkills::SkillId).uuid().not_null())
                    .col(ColumnDef::new(UserSkills::Proficiency).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserSkills::UserId)
                            .col(UserSkills::SkillId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_skills_user")
                            .from(UserSkills::Table, UserSkills::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_skills_skill")
                            .from(UserSkills::Table, UserSkills::SkillId)
                            .to(Skills::Table, Skills::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSkills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JobSkills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Jobs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Skills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    Name,
    Role,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Companies {
    Table,
    Id,
    Name,
    Description,
    Website,
    Industry,
    Size,
    Location,
    FoundedAt,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
    Slug,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum Skills {
    Table,
    Id,
    Name,
    Slug,
    CreatedAt,
}

#[derive(Iden)]
enum Jobs {
    Table,
    Id,
    Title,
    Description,
    Requirements,
    Responsibilities,
    JobType,
    ExperienceLevel,
    SalaryMin,
    SalaryMax,
    Currency,
    Location,
    IsRemote,
    ApplicationEmail,
    ApplicationUrl,
    Status,
    ExpiresAt,
    CompanyId,
    PostedBy,
    CategoryId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Applications {
    Table,
    Id,
    JobId,
    ApplicantId,
    Status,
    CoverLetter,
    ResumeUrl,
    AppliedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum JobSkills {
    Table,
    JobId,
    SkillId,
    IsRequired,
}

#[derive(Iden)]
enum UserSkills {
    Table,
    UserId,
    SkillId,
    Proficiency,
}
