//! Filter compiler unit tests.
//!
//! The compiler is pure, so these tests assert on the predicate tree
//! structure directly.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use jobboard::domain::{ExperienceLevel, JobType};
use jobboard::query::{
    compile, Field, JobFilter, Predicate, Scalar, SortDirection, SortKey,
};

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// The always-applied published-and-not-expired clause
fn baseline(now: chrono::DateTime<Utc>) -> Predicate {
    Predicate::And(vec![
        Predicate::Equals(Field::Status, Scalar::Str("published".to_string())),
        Predicate::Or(vec![
            Predicate::IsNull(Field::ExpiresAt),
            Predicate::After(Field::ExpiresAt, now),
        ]),
    ])
}

/// Top-level conjunction clauses of a compiled filter
fn clauses(filter: &JobFilter) -> Vec<Predicate> {
    let compiled = compile(filter, fixed_now()).unwrap();
    match compiled.predicate {
        Predicate::And(clauses) => clauses,
        other => panic!("expected top-level And, got {:?}", other),
    }
}

fn mentions_field(predicate: &Predicate, field: Field) -> bool {
    match predicate {
        Predicate::Equals(f, _)
        | Predicate::Contains(f, _)
        | Predicate::OneOf(f, _)
        | Predicate::IsNull(f)
        | Predicate::After(f, _) => *f == field,
        Predicate::Range { field: f, .. } => *f == field,
        Predicate::And(children) | Predicate::Or(children) => {
            children.iter().any(|c| mentions_field(c, field))
        }
    }
}

#[test]
fn test_empty_filter_is_baseline_only() {
    let compiled = compile(&JobFilter::default(), fixed_now()).unwrap();

    assert_eq!(compiled.predicate, Predicate::And(vec![baseline(fixed_now())]));
    assert_eq!(compiled.ordering.key, SortKey::CreatedAt);
    assert_eq!(compiled.ordering.direction, SortDirection::Desc);
}

#[test]
fn test_baseline_always_present() {
    let filter = JobFilter {
        search: Some("rust".to_string()),
        job_type: Some(JobType::FullTime),
        salary_min: Some(1000),
        ..Default::default()
    };

    let clauses = clauses(&filter);
    assert_eq!(clauses[0], baseline(fixed_now()));
}

#[test]
fn test_blank_search_is_treated_as_absent() {
    let blank = JobFilter {
        search: Some("   ".to_string()),
        ..Default::default()
    };
    let empty = JobFilter::default();

    assert_eq!(
        compile(&blank, fixed_now()).unwrap(),
        compile(&empty, fixed_now()).unwrap()
    );
}

#[test]
fn test_search_matches_any_of_five_fields() {
    let filter = JobFilter {
        search: Some("  rust  ".to_string()),
        ..Default::default()
    };

    let clauses = clauses(&filter);
    let search = clauses.last().unwrap();

    let expected = Predicate::Or(vec![
        Predicate::Contains(Field::Title, "rust".to_string()),
        Predicate::Contains(Field::Description, "rust".to_string()),
        Predicate::Contains(Field::Requirements, "rust".to_string()),
        Predicate::Contains(Field::Responsibilities, "rust".to_string()),
        Predicate::Contains(Field::CompanyName, "rust".to_string()),
    ]);
    assert_eq!(search, &expected);
}

#[test]
fn test_exact_match_filters() {
    let category = Uuid::new_v4();
    let filter = JobFilter {
        category: Some(category),
        job_type: Some(JobType::Contract),
        experience_level: Some(ExperienceLevel::Senior),
        is_remote: Some(false),
        ..Default::default()
    };

    let clauses = clauses(&filter);
    assert!(clauses.contains(&Predicate::Equals(Field::CategoryId, Scalar::Uuid(category))));
    assert!(clauses.contains(&Predicate::Equals(
        Field::JobType,
        Scalar::Str("contract".to_string())
    )));
    assert!(clauses.contains(&Predicate::Equals(
        Field::ExperienceLevel,
        Scalar::Str("senior".to_string())
    )));
    assert!(clauses.contains(&Predicate::Equals(Field::IsRemote, Scalar::Bool(false))));
}

#[test]
fn test_location_filter_applies_when_not_remote() {
    let filter = JobFilter {
        location: Some("Paris".to_string()),
        ..Default::default()
    };

    let clauses = clauses(&filter);
    assert!(clauses.contains(&Predicate::Contains(Field::Location, "Paris".to_string())));
}

#[test]
fn test_remote_request_suppresses_location_clause() {
    let filter = JobFilter {
        location: Some("Paris".to_string()),
        is_remote: Some(true),
        ..Default::default()
    };

    let compiled = compile(&filter, fixed_now()).unwrap();

    // Remote jobs must never be excluded by a location mismatch
    assert!(!mentions_field(&compiled.predicate, Field::Location));
    match &compiled.predicate {
        Predicate::And(clauses) => {
            assert!(clauses.contains(&Predicate::Equals(Field::IsRemote, Scalar::Bool(true))));
        }
        other => panic!("expected And, got {:?}", other),
    }
}

#[test]
fn test_remote_false_keeps_location_clause() {
    let filter = JobFilter {
        location: Some("Paris".to_string()),
        is_remote: Some(false),
        ..Default::default()
    };

    let clauses = clauses(&filter);
    assert!(clauses.contains(&Predicate::Contains(Field::Location, "Paris".to_string())));
}

#[test]
fn test_salary_min_matches_floor_or_ceiling() {
    let filter = JobFilter {
        salary_min: Some(5000),
        ..Default::default()
    };

    let clauses = clauses(&filter);
    let expected = Predicate::Or(vec![
        Predicate::at_least(Field::SalaryMin, 5000i64),
        Predicate::at_least(Field::SalaryMax, 5000i64),
    ]);
    assert!(clauses.contains(&expected));
}

#[test]
fn test_salary_max_is_single_clause() {
    let filter = JobFilter {
        salary_max: Some(9000),
        ..Default::default()
    };

    let clauses = clauses(&filter);
    assert!(clauses.contains(&Predicate::at_most(Field::SalaryMax, 9000i64)));
    assert!(!mentions_field(&Predicate::And(clauses), Field::SalaryMin));
}

#[test]
fn test_both_salary_bounds_conjoin() {
    let filter = JobFilter {
        salary_min: Some(3000),
        salary_max: Some(9000),
        ..Default::default()
    };

    let clauses = clauses(&filter);
    assert!(clauses.contains(&Predicate::Or(vec![
        Predicate::at_least(Field::SalaryMin, 3000i64),
        Predicate::at_least(Field::SalaryMax, 3000i64),
    ])));
    assert!(clauses.contains(&Predicate::at_most(Field::SalaryMax, 9000i64)));
}

#[test]
fn test_skills_filter_is_one_of() {
    let s1 = Uuid::new_v4();
    let s2 = Uuid::new_v4();
    let filter = JobFilter {
        skills: vec![s1, s2],
        ..Default::default()
    };

    let clauses = clauses(&filter);
    assert!(clauses.contains(&Predicate::OneOf(
        Field::SkillId,
        vec![Scalar::Uuid(s1), Scalar::Uuid(s2)]
    )));
}

#[test]
fn test_empty_skill_list_is_omitted() {
    let filter = JobFilter {
        skills: vec![],
        ..Default::default()
    };

    assert_eq!(
        compile(&filter, fixed_now()).unwrap(),
        compile(&JobFilter::default(), fixed_now()).unwrap()
    );
}

#[test]
fn test_sort_key_mapping() {
    let filter = JobFilter {
        sort_by: Some("salary".to_string()),
        sort_order: Some(SortDirection::Asc),
        ..Default::default()
    };
    let compiled = compile(&filter, fixed_now()).unwrap();
    assert_eq!(compiled.ordering.key, SortKey::Salary);
    assert_eq!(compiled.ordering.direction, SortDirection::Asc);

    let filter = JobFilter {
        sort_by: Some("company".to_string()),
        ..Default::default()
    };
    let compiled = compile(&filter, fixed_now()).unwrap();
    assert_eq!(compiled.ordering.key, SortKey::Company);
    assert_eq!(compiled.ordering.direction, SortDirection::Desc);
}

#[test]
fn test_unknown_sort_key_is_rejected() {
    let filter = JobFilter {
        sort_by: Some("password_hash".to_string()),
        ..Default::default()
    };

    assert!(compile(&filter, fixed_now()).is_err());
}

#[test]
fn test_compile_is_deterministic() {
    let filter = JobFilter {
        search: Some("backend".to_string()),
        job_type: Some(JobType::FullTime),
        salary_min: Some(4000),
        skills: vec![Uuid::new_v4()],
        sort_by: Some("salary".to_string()),
        ..Default::default()
    };

    let now = fixed_now();
    assert_eq!(compile(&filter, now).unwrap(), compile(&filter, now).unwrap());
}
