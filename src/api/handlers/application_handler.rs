//! Application handlers: submissions and the review workflow.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, patch},
    Extension, Router,
};
use uuid::Uuid;

use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{ApplicationResponse, ApplicationStatus, CreateApplication};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, PageRequest};

/// Application status update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    /// New status: reviewed, shortlisted, accepted or rejected
    #[schema(example = "shortlisted")]
    pub status: String,
}

/// Application routes requiring authentication
pub fn application_routes() -> Router<AppState> {
    Router::new()
        .route("/mine", get(my_applications))
        .route("/:id/status", patch(update_application_status))
}

/// Apply to a published job (mounted under /jobs/{id}/apply)
#[utoipa::path(
    post,
    path = "/jobs/{id}/apply",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = CreateApplication,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationResponse),
        (status = 400, description = "Job closed or expired"),
        (status = 403, description = "Not a job seeker"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Already applied")
    )
)]
pub async fn apply_to_job(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateApplication>,
) -> AppResult<Created<ApplicationResponse>> {
    let application = state
        .application_service
        .apply_to_job(&user.actor(), id, payload)
        .await?;

    Ok(Created(ApplicationResponse::from(application)))
}

/// The actor's own applications
#[utoipa::path(
    get,
    path = "/applications/mine",
    tag = "Applications",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Paginated application list"))
)]
pub async fn my_applications(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<ApiResponse<Vec<ApplicationResponse>>>> {
    let result = state
        .application_service
        .my_applications(&user.actor(), &page)
        .await?;

    Ok(Json(ApiResponse::paginated(
        result.map(ApplicationResponse::from),
    )))
}

/// Applications received for an owned job (mounted under /jobs/{id}/applications)
#[utoipa::path(
    get,
    path = "/jobs/{id}/applications",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Paginated application list"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn list_job_applications(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<ApiResponse<Vec<ApplicationResponse>>>> {
    let result = state
        .application_service
        .list_job_applications(&user.actor(), id, &page)
        .await?;

    Ok(Json(ApiResponse::paginated(
        result.map(ApplicationResponse::from),
    )))
}

/// Move an application through the review workflow
#[utoipa::path(
    patch,
    path = "/applications/{id}/status",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status updated", body = ApplicationResponse),
        (status = 400, description = "Terminal status or unknown value"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn update_application_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<ApiResponse<ApplicationResponse>>> {
    let new_status = ApplicationStatus::parse(&payload.status)?;
    let application = state
        .application_service
        .update_status(&user.actor(), id, new_status)
        .await?;

    Ok(Json(ApiResponse::success(ApplicationResponse::from(
        application,
    ))))
}
