//! Boundary response envelope.

use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::pagination::Page;

/// Uniform success envelope returned by every endpoint.
///
/// List endpoints carry their navigation metadata in `pagination`
/// while `data` holds the bare item list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
    pub timestamp: DateTime<Utc>,
}

/// Navigation metadata attached to list responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            pagination: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            pagination: None,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// Build a list envelope from a paginated result set
    pub fn paginated(page: Page<T>) -> Self {
        let info = PageInfo {
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
            has_next: page.has_next,
            has_prev: page.has_prev,
        };
        Self {
            success: true,
            message: None,
            data: Some(page.items),
            pagination: Some(info),
            timestamp: Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            pagination: None,
            timestamp: Utc::now(),
        }
    }
}

/// Created response helper for POST endpoints
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(ApiResponse::success(self.0))).into_response()
    }
}

/// No content response helper for DELETE endpoints
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> axum::response::Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
