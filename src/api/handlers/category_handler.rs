//! Category handlers (reference data).

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, post, put},
    Extension, Router,
};
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CategoryResponse, CreateNamed};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent};

/// Category routes requiring authentication (admin checks in the service)
pub fn protected_category_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_category))
        .route("/:id", put(update_category))
        .route("/:id", delete(delete_category))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Reference data",
    responses((status = 200, description = "All categories"))
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CategoryResponse>>>> {
    let categories = state.category_service.list_categories().await?;
    Ok(Json(ApiResponse::success(
        categories.into_iter().map(CategoryResponse::from).collect(),
    )))
}

/// Create a category (admin)
#[utoipa::path(
    post,
    path = "/categories",
    tag = "Reference data",
    security(("bearer_auth" = [])),
    request_body = CreateNamed,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 403, description = "Not an admin"),
        (status = 409, description = "Name taken")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateNamed>,
) -> AppResult<Created<CategoryResponse>> {
    let category = state
        .category_service
        .create_category(&user.actor(), payload)
        .await?;
    Ok(Created(CategoryResponse::from(category)))
}

/// Rename/describe a category (admin)
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "Reference data",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = CreateNamed,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Name taken")
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateNamed>,
) -> AppResult<Json<ApiResponse<CategoryResponse>>> {
    let category = state
        .category_service
        .update_category(&user.actor(), id, payload)
        .await?;
    Ok(Json(ApiResponse::success(CategoryResponse::from(category))))
}

/// Delete an unreferenced category (admin)
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "Reference data",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, description = "Category referenced by jobs"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state
        .category_service
        .delete_category(&user.actor(), id)
        .await?;
    Ok(NoContent)
}
