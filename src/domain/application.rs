//! Application domain entity and status machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Application lifecycle status.
///
/// PENDING -> REVIEWED/SHORTLISTED -> ACCEPTED/REJECTED.
/// ACCEPTED and REJECTED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Shortlisted,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Terminal statuses admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Accepted | ApplicationStatus::Rejected)
    }

    /// Strict parse for client-supplied values
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "reviewed" => Ok(ApplicationStatus::Reviewed),
            "shortlisted" => Ok(ApplicationStatus::Shortlisted),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(AppError::bad_request(format!(
                "unknown application status '{}'",
                other
            ))),
        }
    }
}

impl From<&str> for ApplicationStatus {
    fn from(s: &str) -> Self {
        ApplicationStatus::parse(s).unwrap_or(ApplicationStatus::Pending)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Application domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub status: ApplicationStatus,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application submission data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateApplication {
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
}

/// Application response returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    #[schema(example = "pending")]
    pub status: String,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub applied_at: DateTime<Utc>,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            job_id: application.job_id,
            applicant_id: application.applicant_id,
            status: application.status.to_string(),
            cover_letter: application.cover_letter,
            resume_url: application.resume_url,
            applied_at: application.applied_at,
        }
    }
}
