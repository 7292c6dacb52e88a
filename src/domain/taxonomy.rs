//! Reference data: categories and skills.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Job category (reference data)
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Skill (reference data, shared by jobs and users)
#[derive(Debug, Clone, Serialize)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// Proficiency attached to a user's skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::Beginner => "beginner",
            Proficiency::Intermediate => "intermediate",
            Proficiency::Advanced => "advanced",
            Proficiency::Expert => "expert",
        }
    }
}

impl From<&str> for Proficiency {
    fn from(s: &str) -> Self {
        match s {
            "intermediate" => Proficiency::Intermediate,
            "advanced" => Proficiency::Advanced,
            "expert" => Proficiency::Expert,
            _ => Proficiency::Beginner,
        }
    }
}

impl std::fmt::Display for Proficiency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Skill held by a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSkill {
    pub skill_id: Uuid,
    pub proficiency: Proficiency,
}

/// Category/skill creation data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateNamed {
    #[schema(example = "Backend Engineering")]
    pub name: String,
    pub description: Option<String>,
}

/// Category response returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    #[schema(example = "backend-engineering")]
    pub slug: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            description: category.description,
        }
    }
}

/// Skill response returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SkillResponse {
    pub id: Uuid,
    pub name: String,
    #[schema(example = "rust")]
    pub slug: String,
}

impl From<Skill> for SkillResponse {
    fn from(skill: Skill) -> Self {
        Self {
            id: skill.id,
            name: skill.name,
            slug: skill.slug,
        }
    }
}

/// Derive a URL-safe, lowercased slug from a display name.
///
/// Slugs are the case-insensitive uniqueness key for reference data.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut prev_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Backend Engineering"), "backend-engineering");
        assert_eq!(slugify("C++ / Systems"), "c-systems");
        assert_eq!(slugify("  Rust  "), "rust");
        assert_eq!(slugify("RUST"), "rust");
    }

    #[test]
    fn test_slugify_case_insensitive_collision() {
        // Same name in different casing collides on the slug
        assert_eq!(slugify("DevOps"), slugify("devops"));
    }
}
