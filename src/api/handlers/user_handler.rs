//! User profile handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{delete, get, put},
    Extension, Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{UserResponse, UserSkill};
use crate::errors::AppResult;
use crate::types::{ApiResponse, NoContent};

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Profile update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name must not be empty"))]
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
}

/// Skill set replacement request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplaceSkillsRequest {
    pub skills: Vec<UserSkill>,
}

/// User routes requiring authentication
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_profile))
        .route("/me", put(update_profile))
        .route("/me", delete(deactivate_account))
        .route("/me/skills", get(get_skills))
        .route("/me/skills", put(replace_skills))
}

/// The actor's own profile
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Current user", body = UserResponse))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let profile = state.user_service.get_profile(&user.actor()).await?;
    Ok(Json(ApiResponse::success(UserResponse::from(profile))))
}

/// Update profile fields
#[utoipa::path(
    put,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses((status = 200, description = "Profile updated", body = UserResponse))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let profile = state
        .user_service
        .update_profile(
            &user.actor(),
            crate::domain::UpdateProfile { name: payload.name },
        )
        .await?;
    Ok(Json(ApiResponse::success(UserResponse::from(profile))))
}

/// The actor's skill set
#[utoipa::path(
    get,
    path = "/users/me/skills",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Current skill set"))
)]
pub async fn get_skills(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<UserSkill>>>> {
    let skills = state.user_service.get_skills(&user.actor()).await?;
    Ok(Json(ApiResponse::success(skills)))
}

/// Replace the actor's whole skill set
#[utoipa::path(
    put,
    path = "/users/me/skills",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = ReplaceSkillsRequest,
    responses(
        (status = 200, description = "Skill set replaced"),
        (status = 404, description = "Unknown skill id")
    )
)]
pub async fn replace_skills(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ReplaceSkillsRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .user_service
        .replace_skills(&user.actor(), payload.skills)
        .await?;
    Ok(Json(ApiResponse::message("Skill set replaced")))
}

/// Deactivate the account
#[utoipa::path(
    delete,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses((status = 204, description = "Account deactivated"))
)]
pub async fn deactivate_account(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<NoContent> {
    state.user_service.deactivate_account(&user.actor()).await?;
    Ok(NoContent)
}
