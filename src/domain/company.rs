//! Company domain entity and related types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Company size bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CompanySize {
    Micro,
    Small,
    Medium,
    Large,
    Enterprise,
}

impl CompanySize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySize::Micro => "1-10",
            CompanySize::Small => "11-50",
            CompanySize::Medium => "51-200",
            CompanySize::Large => "201-1000",
            CompanySize::Enterprise => "1000+",
        }
    }

    /// Strict parse for client-supplied values
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "1-10" => Ok(CompanySize::Micro),
            "11-50" => Ok(CompanySize::Small),
            "51-200" => Ok(CompanySize::Medium),
            "201-1000" => Ok(CompanySize::Large),
            "1000+" => Ok(CompanySize::Enterprise),
            other => Err(AppError::bad_request(format!(
                "unknown company size '{}'",
                other
            ))),
        }
    }
}

impl From<&str> for CompanySize {
    fn from(s: &str) -> Self {
        CompanySize::parse(s).unwrap_or(CompanySize::Micro)
    }
}

impl std::fmt::Display for CompanySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Company domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub size: Option<CompanySize>,
    pub location: Option<String>,
    pub founded_at: Option<NaiveDate>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Company creation data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCompany {
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    /// Size band, e.g. "11-50"
    #[schema(example = "11-50")]
    pub size: Option<String>,
    pub location: Option<String>,
    /// Founding date, must not be in the future
    pub founded_at: Option<NaiveDate>,
}

/// Company update data transfer object (all fields optional)
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCompany {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub location: Option<String>,
    pub founded_at: Option<NaiveDate>,
}

/// Company response returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompanyResponse {
    pub id: Uuid,
    #[schema(example = "Acme Inc")]
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    #[schema(example = "11-50")]
    pub size: Option<String>,
    pub location: Option<String>,
    pub founded_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            description: company.description,
            website: company.website,
            industry: company.industry,
            size: company.size.map(|s| s.to_string()),
            location: company.location,
            founded_at: company.founded_at,
            created_at: company.created_at,
        }
    }
}
