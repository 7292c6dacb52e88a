//! Filter compiler.
//!
//! Translates a search/filter request into a predicate tree plus an ordering
//! directive. The repository runs the paged fetch and the count from the same
//! compiled query, so the total always matches the page's universe.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{ExperienceLevel, JobStatus, JobType};
use crate::errors::AppResult;

use super::predicate::{Field, Ordering, Predicate, Scalar, SortDirection, SortKey};

/// Closed configuration of optional job filters.
///
/// An empty filter matches all open (published, unexpired) jobs.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub search: Option<String>,
    pub category: Option<Uuid>,
    pub job_type: Option<JobType>,
    pub experience_level: Option<ExperienceLevel>,
    pub location: Option<String>,
    pub is_remote: Option<bool>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub skills: Vec<Uuid>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortDirection>,
}

/// Output of a compile: one predicate shared by fetch and count, one ordering
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub predicate: Predicate,
    pub ordering: Ordering,
}

/// Fields searched by the free-text `search` term (OR across all of them)
const SEARCH_FIELDS: [Field; 5] = [
    Field::Title,
    Field::Description,
    Field::Requirements,
    Field::Responsibilities,
    Field::CompanyName,
];

/// Compile a filter request against a fixed `now`.
///
/// `now` must be captured once per request so the fetch and the count share
/// the same expiry cutoff. Pure: equal inputs yield an equal tree.
pub fn compile(filter: &JobFilter, now: DateTime<Utc>) -> AppResult<CompiledQuery> {
    let mut clauses = vec![baseline(now)];

    if let Some(category) = filter.category {
        clauses.push(Predicate::Equals(Field::CategoryId, Scalar::Uuid(category)));
    }

    if let Some(job_type) = filter.job_type {
        clauses.push(Predicate::Equals(
            Field::JobType,
            Scalar::Str(job_type.as_str().to_string()),
        ));
    }

    if let Some(level) = filter.experience_level {
        clauses.push(Predicate::Equals(
            Field::ExperienceLevel,
            Scalar::Str(level.as_str().to_string()),
        ));
    }

    // A location filter must never exclude remote jobs: when the request
    // asks for remote, the location clause is dropped entirely.
    let remote_requested = filter.is_remote == Some(true);
    if let Some(location) = non_blank(filter.location.as_deref()) {
        if !remote_requested {
            clauses.push(Predicate::Contains(Field::Location, location.to_string()));
        }
    }

    if let Some(is_remote) = filter.is_remote {
        clauses.push(Predicate::Equals(Field::IsRemote, Scalar::Bool(is_remote)));
    }

    // "Can the job realistically pay at least this much": its own floor or
    // its own ceiling reaches the requested minimum.
    if let Some(min) = filter.salary_min {
        clauses.push(Predicate::Or(vec![
            Predicate::at_least(Field::SalaryMin, min),
            Predicate::at_least(Field::SalaryMax, min),
        ]));
    }

    if let Some(max) = filter.salary_max {
        clauses.push(Predicate::at_most(Field::SalaryMax, max));
    }

    if !filter.skills.is_empty() {
        clauses.push(Predicate::OneOf(
            Field::SkillId,
            filter.skills.iter().copied().map(Scalar::Uuid).collect(),
        ));
    }

    if let Some(term) = non_blank(filter.search.as_deref()) {
        clauses.push(Predicate::Or(
            SEARCH_FIELDS
                .iter()
                .map(|&field| Predicate::Contains(field, term.to_string()))
                .collect(),
        ));
    }

    Ok(CompiledQuery {
        predicate: Predicate::And(clauses),
        ordering: ordering(filter)?,
    })
}

/// Always-applied clause: published and not past expiry at `now`
fn baseline(now: DateTime<Utc>) -> Predicate {
    Predicate::And(vec![
        Predicate::Equals(
            Field::Status,
            Scalar::Str(JobStatus::Published.as_str().to_string()),
        ),
        Predicate::Or(vec![
            Predicate::IsNull(Field::ExpiresAt),
            Predicate::After(Field::ExpiresAt, now),
        ]),
    ])
}

fn ordering(filter: &JobFilter) -> AppResult<Ordering> {
    let key = match non_blank(filter.sort_by.as_deref()) {
        Some(name) => SortKey::parse(name)?,
        None => SortKey::CreatedAt,
    };
    Ok(Ordering {
        key,
        direction: filter.sort_order.unwrap_or(SortDirection::Desc),
    })
}

/// Trimmed, or None when empty/whitespace-only
fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|t| !t.is_empty())
}
