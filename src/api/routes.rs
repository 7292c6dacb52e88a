//! Application route configuration.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    application_routes, auth_routes, category_handler, protected_category_routes,
    protected_company_routes, protected_job_routes, protected_skill_routes, public_company_routes,
    public_job_routes, skill_handler, user_routes,
};
use super::middleware::{auth_middleware, optional_auth_middleware};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let auth_state = state.clone();
    let authenticated = move |router: Router<AppState>| {
        router.route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
    };

    Router::new()
        // Health check endpoints
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public authentication routes
        .nest("/auth", auth_routes())
        // Job search is public; drafts stay visible to their owner through
        // the optional bearer token
        .nest(
            "/jobs",
            public_job_routes()
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    optional_auth_middleware,
                ))
                .merge(authenticated(protected_job_routes())),
        )
        .nest(
            "/companies",
            public_company_routes().merge(authenticated(protected_company_routes())),
        )
        .nest(
            "/applications",
            authenticated(application_routes()),
        )
        .nest(
            "/categories",
            Router::new()
                .route("/", get(category_handler::list_categories))
                .merge(authenticated(protected_category_routes())),
        )
        .nest(
            "/skills",
            Router::new()
                .route("/", get(skill_handler::list_skills))
                .merge(authenticated(protected_skill_routes())),
        )
        // Protected user routes
        .nest("/users", authenticated(user_routes()))
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Job Board API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.database.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy",
                error: Some(e.to_string()),
            }),
        ),
    }
}
