//! Company handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post, put},
    Extension, Router,
};
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CompanyResponse, CreateCompany, UpdateCompany};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, PageRequest};

/// Public company routes
pub fn public_company_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies))
        .route("/:id", get(get_company))
}

/// Company routes requiring authentication
pub fn protected_company_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_company))
        .route("/:id", put(update_company))
        .route("/:id", delete(delete_company))
}

/// List companies
#[utoipa::path(
    get,
    path = "/companies",
    tag = "Companies",
    responses((status = 200, description = "Paginated company list"))
)]
pub async fn list_companies(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<ApiResponse<Vec<CompanyResponse>>>> {
    let result = state.company_service.list_companies(&page).await?;
    Ok(Json(ApiResponse::paginated(result.map(CompanyResponse::from))))
}

/// Fetch one company
#[utoipa::path(
    get,
    path = "/companies/{id}",
    tag = "Companies",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company detail", body = CompanyResponse),
        (status = 404, description = "Company not found")
    )
)]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CompanyResponse>>> {
    let company = state.company_service.get_company(id).await?;
    Ok(Json(ApiResponse::success(CompanyResponse::from(company))))
}

/// Create the employer's company
#[utoipa::path(
    post,
    path = "/companies",
    tag = "Companies",
    security(("bearer_auth" = [])),
    request_body = CreateCompany,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not an employer"),
        (status = 409, description = "Name taken or owner already has a company")
    )
)]
pub async fn create_company(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateCompany>,
) -> AppResult<Created<CompanyResponse>> {
    let company = state
        .company_service
        .create_company(&user.actor(), payload)
        .await?;
    Ok(Created(CompanyResponse::from(company)))
}

/// Update an owned company
#[utoipa::path(
    put,
    path = "/companies/{id}",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Company ID")),
    request_body = UpdateCompany,
    responses(
        (status = 200, description = "Company updated", body = CompanyResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Company not found"),
        (status = 409, description = "Name taken")
    )
)]
pub async fn update_company(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCompany>,
) -> AppResult<Json<ApiResponse<CompanyResponse>>> {
    let company = state
        .company_service
        .update_company(&user.actor(), id, payload)
        .await?;
    Ok(Json(ApiResponse::success(CompanyResponse::from(company))))
}

/// Delete an owned company with no jobs
#[utoipa::path(
    delete,
    path = "/companies/{id}",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 400, description = "Company still has jobs"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn delete_company(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state
        .company_service
        .delete_company(&user.actor(), id)
        .await?;
    Ok(NoContent)
}
