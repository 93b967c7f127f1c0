use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

/// Failure modes of catalog operations, mapped onto JSON API responses.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),

    #[error("upstream error: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream error: {0}")]
    UpstreamMessage(String),
}

impl CatalogError {
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Storage(_)
            | CatalogError::Upstream(_)
            | CatalogError::UpstreamMessage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to a client. Server-side failures never leak their cause.
    pub fn public_message(&self) -> String {
        match self {
            CatalogError::Validation(msg) | CatalogError::NotFound(msg) => msg.clone(),
            CatalogError::Storage(_) => "internal storage error".to_string(),
            CatalogError::Upstream(_) | CatalogError::UpstreamMessage(_) => {
                "metadata provider unavailable".to_string()
            },
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for CatalogError {
    fn from(rejection: PathRejection) -> Self {
        CatalogError::Validation(rejection.body_text())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failure of an HTML page route, rendered as the error page.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    source: anyhow::Error,
}

impl AppError {
    pub fn bad_request(source: impl Into<anyhow::Error>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, source: source.into() }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.source.fmt(f)
    }
}

impl std::error::Error for AppError {}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let status = err.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %err, "page request failed");
        }
        Self { status, source: anyhow::anyhow!(err.public_message()) }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(anyhow::anyhow!(rejection.body_text()))
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        Self::bad_request(anyhow::anyhow!(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = crate::templates::error_page(self.to_string());
        (self.status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
