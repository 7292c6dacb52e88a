//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_EMPLOYER, ROLE_JOB_SEEKER, TOMBSTONE_EMAIL_DOMAIN};
use crate::errors::{AppError, AppResult};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    JobSeeker,
    Employer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::JobSeeker => ROLE_JOB_SEEKER,
            UserRole::Employer => ROLE_EMPLOYER,
            UserRole::Admin => ROLE_ADMIN,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn is_employer(&self) -> bool {
        matches!(self, UserRole::Employer)
    }

    pub fn is_job_seeker(&self) -> bool {
        matches!(self, UserRole::JobSeeker)
    }

    /// Strict parse for client-supplied values
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            ROLE_JOB_SEEKER => Ok(UserRole::JobSeeker),
            ROLE_EMPLOYER => Ok(UserRole::Employer),
            ROLE_ADMIN => Ok(UserRole::Admin),
            other => Err(AppError::bad_request(format!("unknown role '{}'", other))),
        }
    }
}

// Lenient conversion for values loaded from storage
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            ROLE_EMPLOYER => UserRole::Employer,
            _ => UserRole::JobSeeker,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authenticated actor performing an operation.
///
/// Produced by the auth middleware from verified token claims and passed
/// down to service methods for ownership and role checks.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Anonymized replacement email for a deactivated account.
    ///
    /// Uses a fresh UUID rather than the account id so the value cannot be
    /// reversed into the original account.
    pub fn tombstone_email() -> String {
        format!("deleted-{}@{}", Uuid::new_v4(), TOMBSTONE_EMAIL_DOMAIN)
    }
}

/// Profile update data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProfile {
    /// New display name
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// User role
    #[schema(example = "job_seeker")]
    pub role: String,
    pub is_active: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role.to_string(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}
