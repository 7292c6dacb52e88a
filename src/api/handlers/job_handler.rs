//! Job handlers: public search plus the employer posting surface.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateJob, Job, JobDetail, JobStats, JobSummary, UpdateJob};
use crate::errors::{AppError, AppResult};
use crate::query::{JobFilter, SortDirection};
use crate::types::{ApiResponse, Created, NoContent, PageRequest};

/// Flat job search/filter query parameters, as they arrive on the wire.
///
/// Coerced into a typed [`JobFilter`] before reaching the compiler.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JobFilterQuery {
    /// Free-text search over title, description, requirements,
    /// responsibilities and company name
    pub search: Option<String>,
    pub category: Option<Uuid>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub location: Option<String>,
    pub is_remote: Option<bool>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    /// Comma-separated skill IDs; a job matches with any one of them
    pub skills: Option<String>,
    /// Sort key (created_at, updated_at, title, salary, company, ...)
    pub sort_by: Option<String>,
    /// "asc" or "desc"
    pub sort_order: Option<String>,
}

impl JobFilterQuery {
    /// Coerce the wire form into the compiler's typed filter
    pub fn try_into_filter(self) -> AppResult<JobFilter> {
        let job_type = self
            .job_type
            .as_deref()
            .map(crate::domain::JobType::parse)
            .transpose()?;
        let experience_level = self
            .experience_level
            .as_deref()
            .map(crate::domain::ExperienceLevel::parse)
            .transpose()?;

        let skills = match self.skills.as_deref() {
            None => Vec::new(),
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    Uuid::parse_str(s)
                        .map_err(|_| AppError::bad_request(format!("invalid skill id '{}'", s)))
                })
                .collect::<AppResult<Vec<_>>>()?,
        };

        let sort_order = match self.sort_order.as_deref() {
            None => None,
            Some("asc") => Some(SortDirection::Asc),
            Some("desc") => Some(SortDirection::Desc),
            Some(other) => {
                return Err(AppError::bad_request(format!(
                    "sort_order must be 'asc' or 'desc', got '{}'",
                    other
                )))
            }
        };

        Ok(JobFilter {
            search: self.search,
            category: self.category,
            job_type,
            experience_level,
            location: self.location,
            is_remote: self.is_remote,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            skills,
            sort_by: self.sort_by,
            sort_order,
        })
    }
}

/// Public job routes (optional authentication: owners see their drafts)
pub fn public_job_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(search_jobs))
        .route("/:id", get(get_job))
}

/// Job routes requiring authentication
pub fn protected_job_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_job))
        .route("/mine", get(list_my_jobs))
        .route("/:id", put(update_job))
        .route("/:id", delete(delete_job))
        .route("/:id/publish", post(publish_job))
        .route("/:id/close", post(close_job))
        .route("/:id/stats", get(job_stats))
        .route("/:id/apply", post(super::application_handler::apply_to_job))
        .route(
            "/:id/applications",
            get(super::application_handler::list_job_applications),
        )
}

/// Search published jobs
#[utoipa::path(
    get,
    path = "/jobs",
    tag = "Jobs",
    params(JobFilterQuery),
    responses(
        (status = 200, description = "Paginated job list"),
        (status = 400, description = "Invalid filter or sort parameter")
    )
)]
pub async fn search_jobs(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
    Query(filter): Query<JobFilterQuery>,
) -> AppResult<Json<ApiResponse<Vec<JobSummary>>>> {
    let filter = filter.try_into_filter()?;
    let result = state.job_service.search_jobs(filter, &page).await?;

    Ok(Json(ApiResponse::paginated(result)))
}

/// Fetch one job
#[utoipa::path(
    get,
    path = "/jobs/{id}",
    tag = "Jobs",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job detail", body = JobDetail),
        (status = 404, description = "Job not found or not visible")
    )
)]
pub async fn get_job(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<JobDetail>>> {
    let actor = user.as_ref().map(|Extension(u)| u.actor());
    let detail = state.job_service.get_job(actor.as_ref(), id).await?;

    Ok(Json(ApiResponse::success(detail)))
}

/// Create a job posting (employer)
#[utoipa::path(
    post,
    path = "/jobs",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    request_body = CreateJob,
    responses(
        (status = 201, description = "Job created as draft"),
        (status = 400, description = "Validation error or missing company"),
        (status = 403, description = "Not an employer"),
        (status = 404, description = "Category or skill not found")
    )
)]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateJob>,
) -> AppResult<Created<Job>> {
    let job = state.job_service.create_job(&user.actor(), payload).await?;
    Ok(Created(job))
}

/// Update an owned job
#[utoipa::path(
    put,
    path = "/jobs/{id}",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = UpdateJob,
    responses(
        (status = 200, description = "Job updated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn update_job(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJob>,
) -> AppResult<Json<ApiResponse<Job>>> {
    let job = state
        .job_service
        .update_job(&user.actor(), id, payload)
        .await?;
    Ok(Json(ApiResponse::success(job)))
}

/// Publish an owned job
#[utoipa::path(
    post,
    path = "/jobs/{id}/publish",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job published"),
        (status = 400, description = "Already published"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn publish_job(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Job>>> {
    let job = state.job_service.publish_job(&user.actor(), id).await?;
    Ok(Json(ApiResponse::with_message(job, "Job published")))
}

/// Close an owned job
#[utoipa::path(
    post,
    path = "/jobs/{id}/close",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job closed"),
        (status = 400, description = "Already closed"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn close_job(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Job>>> {
    let job = state.job_service.close_job(&user.actor(), id).await?;
    Ok(Json(ApiResponse::with_message(job, "Job closed")))
}

/// Delete an owned job with no applications
#[utoipa::path(
    delete,
    path = "/jobs/{id}",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 400, description = "Job has applications"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.job_service.delete_job(&user.actor(), id).await?;
    Ok(NoContent)
}

/// The employer's own listings, any status
#[utoipa::path(
    get,
    path = "/jobs/mine",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated job list"),
        (status = 400, description = "No company profile")
    )
)]
pub async fn list_my_jobs(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<ApiResponse<Vec<JobSummary>>>> {
    let result = state
        .job_service
        .list_my_jobs(&user.actor(), &page)
        .await?;
    Ok(Json(ApiResponse::paginated(result)))
}

/// Application counts per status for an owned job
#[utoipa::path(
    get,
    path = "/jobs/{id}/stats",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Application statistics", body = JobStats),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn job_stats(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<JobStats>>> {
    let stats = state.job_service.job_stats(&user.actor(), id).await?;
    Ok(Json(ApiResponse::success(stats)))
}
