//! Skill handlers (reference data).

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, post},
    Extension, Router,
};
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateNamed, SkillResponse};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent};

/// Skill routes requiring authentication (admin checks in the service)
pub fn protected_skill_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_skill))
        .route("/:id", delete(delete_skill))
}

/// List all skills
#[utoipa::path(
    get,
    path = "/skills",
    tag = "Reference data",
    responses((status = 200, description = "All skills"))
)]
pub async fn list_skills(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<SkillResponse>>>> {
    let skills = state.skill_service.list_skills().await?;
    Ok(Json(ApiResponse::success(
        skills.into_iter().map(SkillResponse::from).collect(),
    )))
}

/// Create a skill (admin)
#[utoipa::path(
    post,
    path = "/skills",
    tag = "Reference data",
    security(("bearer_auth" = [])),
    request_body = CreateNamed,
    responses(
        (status = 201, description = "Skill created", body = SkillResponse),
        (status = 403, description = "Not an admin"),
        (status = 409, description = "Name taken")
    )
)]
pub async fn create_skill(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateNamed>,
) -> AppResult<Created<SkillResponse>> {
    let skill = state
        .skill_service
        .create_skill(&user.actor(), payload)
        .await?;
    Ok(Created(SkillResponse::from(skill)))
}

/// Delete an unreferenced skill (admin)
#[utoipa::path(
    delete,
    path = "/skills/{id}",
    tag = "Reference data",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Skill ID")),
    responses(
        (status = 204, description = "Skill deleted"),
        (status = 400, description = "Skill still referenced"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Skill not found")
    )
)]
pub async fn delete_skill(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.skill_service.delete_skill(&user.actor(), id).await?;
    Ok(NoContent)
}
