//! Predicate tree and ordering directive.
//!
//! A compiled filter is an explicit boolean expression over a closed set of
//! job fields, lowered to SQL by the job repository. Keeping the tree as
//! plain data makes compilation a pure, comparable function.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Fields a predicate may reference.
///
/// `CompanyName` resolves through the owning-company join; `SkillId`
/// resolves through the job/skill association table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Requirements,
    Responsibilities,
    JobType,
    ExperienceLevel,
    Location,
    IsRemote,
    SalaryMin,
    SalaryMax,
    Status,
    ExpiresAt,
    CategoryId,
    CompanyName,
    SkillId,
}

/// Literal comparison values
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Bool(bool),
    Uuid(Uuid),
    Time(DateTime<Utc>),
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<Uuid> for Scalar {
    fn from(v: Uuid) -> Self {
        Scalar::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(v: DateTime<Utc>) -> Self {
        Scalar::Time(v)
    }
}

/// Boolean expression over job fields.
///
/// `Contains` is a case-insensitive substring match. `Range` bounds are
/// inclusive; `After` is the strict comparison used for the expiry cutoff.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equals(Field, Scalar),
    Contains(Field, String),
    Range {
        field: Field,
        min: Option<Scalar>,
        max: Option<Scalar>,
    },
    OneOf(Field, Vec<Scalar>),
    IsNull(Field),
    After(Field, DateTime<Utc>),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Inclusive lower bound on a field
    pub fn at_least(field: Field, min: impl Into<Scalar>) -> Self {
        Predicate::Range {
            field,
            min: Some(min.into()),
            max: None,
        }
    }

    /// Inclusive upper bound on a field
    pub fn at_most(field: Field, max: impl Into<Scalar>) -> Self {
        Predicate::Range {
            field,
            min: None,
            max: Some(max.into()),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Allow-listed sort keys.
///
/// Client sort names are validated here rather than forwarded to the store,
/// so a request can never order by an arbitrary column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
    Title,
    /// Sorts by the job's maximum salary
    Salary,
    /// Sorts lexically by the owning company's name
    Company,
    ExpiresAt,
    ExperienceLevel,
}

impl SortKey {
    /// Parse a client-supplied sort name (snake_case or camelCase accepted)
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "created_at" | "createdAt" => Ok(SortKey::CreatedAt),
            "updated_at" | "updatedAt" => Ok(SortKey::UpdatedAt),
            "title" => Ok(SortKey::Title),
            "salary" => Ok(SortKey::Salary),
            "company" => Ok(SortKey::Company),
            "expires_at" | "expiresAt" => Ok(SortKey::ExpiresAt),
            "experience_level" | "experienceLevel" => Ok(SortKey::ExperienceLevel),
            other => Err(AppError::bad_request(format!(
                "unsupported sort key '{}'",
                other
            ))),
        }
    }
}

/// Single-key ordering directive applied to a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub key: SortKey,
    pub direction: SortDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_aliases() {
        assert_eq!(SortKey::parse("created_at").unwrap(), SortKey::CreatedAt);
        assert_eq!(SortKey::parse("createdAt").unwrap(), SortKey::CreatedAt);
        assert_eq!(SortKey::parse("salary").unwrap(), SortKey::Salary);
        assert_eq!(SortKey::parse("company").unwrap(), SortKey::Company);
    }

    #[test]
    fn test_sort_key_rejects_unknown_field() {
        assert!(SortKey::parse("password_hash").is_err());
        assert!(SortKey::parse("id; DROP TABLE jobs").is_err());
    }
}
