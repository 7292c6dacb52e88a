//! Boundary contract tests.
//!
//! These cover the response envelope, error-to-status mapping and the
//! coercion of flat query parameters into the typed filter, without
//! requiring a database connection.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use jobboard::api::handlers::job_handler::JobFilterQuery;
use jobboard::domain::{ApplicationStatus, JobStatus, JobType, User, UserRole};
use jobboard::errors::AppError;
use jobboard::query::SortDirection;
use jobboard::types::{ApiResponse, Page, PageRequest};

// =============================================================================
// Envelope
// =============================================================================

#[test]
fn test_success_envelope_shape() {
    let response = ApiResponse::success("payload");
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["success"], json!(true));
    assert_eq!(value["data"], json!("payload"));
    assert!(value.get("pagination").is_none());
    assert!(value.get("timestamp").is_some());
}

#[test]
fn test_paginated_envelope_shape() {
    let page = Page::new(vec![1, 2, 3], 23, 2, 10);
    let response = ApiResponse::paginated(page);
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["data"], json!([1, 2, 3]));
    let pagination = &value["pagination"];
    assert_eq!(pagination["total"], json!(23));
    assert_eq!(pagination["page"], json!(2));
    assert_eq!(pagination["limit"], json!(10));
    assert_eq!(pagination["totalPages"], json!(3));
    assert_eq!(pagination["hasNext"], json!(true));
    assert_eq!(pagination["hasPrev"], json!(true));
}

#[test]
fn test_message_only_envelope() {
    let response = ApiResponse::message("done");
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["success"], json!(true));
    assert_eq!(value["message"], json!("done"));
    assert!(value.get("data").is_none());
}

// =============================================================================
// Error mapping
// =============================================================================

#[test]
fn test_error_status_codes() {
    assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
    assert_eq!(AppError::not_found("Job").status(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::conflict("Application").status(), StatusCode::CONFLICT);
    assert_eq!(
        AppError::validation("bad input").status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::bad_request("bad input").status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::internal("boom").status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_response_status() {
    let response = AppError::not_found("Job").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = AppError::conflict("Application").into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// =============================================================================
// Pagination contract
// =============================================================================

#[test]
fn test_page_request_clamping_from_query_values() {
    let request: PageRequest = serde_json::from_value(json!({"page": 0, "limit": 1000})).unwrap();
    assert_eq!(request.page(), 1);
    assert_eq!(request.limit(), 50);

    let request: PageRequest = serde_json::from_value(json!({"page": -2, "limit": -5})).unwrap();
    assert_eq!(request.page(), 1);
    assert_eq!(request.limit(), 1);

    let request: PageRequest = serde_json::from_value(json!({})).unwrap();
    assert_eq!(request.page(), 1);
    assert_eq!(request.limit(), 10);
}

// =============================================================================
// Filter query coercion
// =============================================================================

#[test]
fn test_filter_query_coercion() {
    let s1 = uuid::Uuid::new_v4();
    let s2 = uuid::Uuid::new_v4();

    let query = JobFilterQuery {
        search: Some("rust".to_string()),
        job_type: Some("full_time".to_string()),
        experience_level: Some("senior".to_string()),
        skills: Some(format!("{}, {}", s1, s2)),
        sort_order: Some("asc".to_string()),
        ..Default::default()
    };

    let filter = query.try_into_filter().unwrap();
    assert_eq!(filter.job_type, Some(JobType::FullTime));
    assert_eq!(filter.skills, vec![s1, s2]);
    assert_eq!(filter.sort_order, Some(SortDirection::Asc));
}

#[test]
fn test_filter_query_rejects_unknown_enum_values() {
    let query = JobFilterQuery {
        job_type: Some("gig".to_string()),
        ..Default::default()
    };
    assert!(query.try_into_filter().is_err());

    let query = JobFilterQuery {
        sort_order: Some("upward".to_string()),
        ..Default::default()
    };
    assert!(query.try_into_filter().is_err());

    let query = JobFilterQuery {
        skills: Some("not-a-uuid".to_string()),
        ..Default::default()
    };
    assert!(query.try_into_filter().is_err());
}

#[test]
fn test_filter_query_empty_skill_list() {
    let query = JobFilterQuery {
        skills: Some(" , ,".to_string()),
        ..Default::default()
    };
    let filter = query.try_into_filter().unwrap();
    assert!(filter.skills.is_empty());
}

// =============================================================================
// Domain types
// =============================================================================

#[test]
fn test_role_round_trip() {
    assert_eq!(UserRole::parse("employer").unwrap(), UserRole::Employer);
    assert_eq!(UserRole::Employer.to_string(), "employer");
    assert!(UserRole::parse("overlord").is_err());
}

#[test]
fn test_job_status_from_storage() {
    assert_eq!(JobStatus::from("published"), JobStatus::Published);
    assert_eq!(JobStatus::from("expired"), JobStatus::Expired);
}

#[test]
fn test_application_status_terminality() {
    assert!(ApplicationStatus::Accepted.is_terminal());
    assert!(ApplicationStatus::Rejected.is_terminal());
    assert!(!ApplicationStatus::Pending.is_terminal());
    assert!(!ApplicationStatus::Shortlisted.is_terminal());
}

#[test]
fn test_tombstone_email_is_unique_and_anonymized() {
    let first = User::tombstone_email();
    let second = User::tombstone_email();

    assert_ne!(first, second);
    assert!(first.starts_with("deleted-"));
    assert!(first.ends_with("@tombstone.invalid"));
}
