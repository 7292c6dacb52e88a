//! Job domain entity, lifecycle enums and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Employment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full_time",
            JobType::PartTime => "part_time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
            JobType::Temporary => "temporary",
        }
    }

    /// Strict parse for client-supplied values
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "full_time" => Ok(JobType::FullTime),
            "part_time" => Ok(JobType::PartTime),
            "contract" => Ok(JobType::Contract),
            "internship" => Ok(JobType::Internship),
            "temporary" => Ok(JobType::Temporary),
            other => Err(AppError::bad_request(format!("unknown job type '{}'", other))),
        }
    }
}

impl From<&str> for JobType {
    fn from(s: &str) -> Self {
        JobType::parse(s).unwrap_or(JobType::FullTime)
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Required experience level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    Junior,
    Mid,
    Senior,
    Lead,
    Executive,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Lead => "lead",
            ExperienceLevel::Executive => "executive",
        }
    }

    /// Strict parse for client-supplied values
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "entry" => Ok(ExperienceLevel::Entry),
            "junior" => Ok(ExperienceLevel::Junior),
            "mid" => Ok(ExperienceLevel::Mid),
            "senior" => Ok(ExperienceLevel::Senior),
            "lead" => Ok(ExperienceLevel::Lead),
            "executive" => Ok(ExperienceLevel::Executive),
            other => Err(AppError::bad_request(format!(
                "unknown experience level '{}'",
                other
            ))),
        }
    }
}

impl From<&str> for ExperienceLevel {
    fn from(s: &str) -> Self {
        ExperienceLevel::parse(s).unwrap_or(ExperienceLevel::Entry)
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Job lifecycle status.
///
/// DRAFT -> PUBLISHED -> CLOSED/EXPIRED; re-publishing is allowed from any
/// non-PUBLISHED state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    Published,
    Closed,
    Expired,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Published => "published",
            JobStatus::Closed => "closed",
            JobStatus::Expired => "expired",
        }
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s {
            "published" => JobStatus::Published,
            "closed" => JobStatus::Closed,
            "expired" => JobStatus::Expired,
            _ => JobStatus::Draft,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Job domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub currency: Option<String>,
    pub location: Option<String>,
    pub is_remote: bool,
    pub application_email: Option<String>,
    pub application_url: Option<String>,
    pub status: JobStatus,
    pub expires_at: Option<DateTime<Utc>>,
    pub company_id: Uuid,
    pub posted_by: Uuid,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// A job past its expiry date is inactive even before the sweep
    /// flips its status to EXPIRED.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }

    /// Publicly visible: published and not past expiry
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.status == JobStatus::Published && !self.is_expired_at(now)
    }
}

/// Skill attached to a job, tagged required or optional
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobSkill {
    pub skill_id: Uuid,
    #[serde(default)]
    pub is_required: bool,
}

/// Job creation data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateJob {
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    #[schema(example = "full_time")]
    pub job_type: String,
    #[schema(example = "mid")]
    pub experience_level: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    #[schema(example = "EUR")]
    pub currency: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub is_remote: bool,
    pub application_email: Option<String>,
    pub application_url: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub skills: Vec<JobSkill>,
}

/// Job update data transfer object.
///
/// `skills` of `Some(vec)` replaces the whole skill set; `None` leaves it
/// untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateJob {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub currency: Option<String>,
    pub location: Option<String>,
    pub is_remote: Option<bool>,
    pub application_email: Option<String>,
    pub application_url: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
    pub skills: Option<Vec<JobSkill>>,
}

/// Job list item returned by search and listing endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    #[schema(example = "full_time")]
    pub job_type: String,
    #[schema(example = "mid")]
    pub experience_level: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub currency: Option<String>,
    pub location: Option<String>,
    pub is_remote: bool,
    pub status: String,
    pub company_id: Uuid,
    pub company_name: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Full job detail with company name and skill associations
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: Job,
    pub company_name: Option<String>,
    pub skills: Vec<JobSkillDetail>,
}

/// Skill row in a job detail response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobSkillDetail {
    pub skill_id: Uuid,
    pub name: String,
    pub is_required: bool,
}

/// Per-status application counts for one job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct JobStats {
    pub total: u64,
    pub pending: u64,
    pub reviewed: u64,
    pub shortlisted: u64,
    pub accepted: u64,
    pub rejected: u64,
}

// Job is serialized flattened inside JobDetail; schema registered manually
impl<'s> utoipa::ToSchema<'s> for Job {
    fn schema() -> (
        &'s str,
        utoipa::openapi::RefOr<utoipa::openapi::schema::Schema>,
    ) {
        (
            "Job",
            utoipa::openapi::ObjectBuilder::new()
                .description(Some("Job posting"))
                .into(),
        )
    }
}
