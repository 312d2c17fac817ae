use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio::task::JoinError;
use tracing::{error, warn};

use super::document::{ErrorDocument, JSONAPI_MEDIA_TYPE, RESOURCE_TYPE};
use crate::error::ReunionError;

/// Everything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    Reunion(ReunionError),
    /// The request body was not a usable JSON:API document.
    Payload(String),
    /// `data.type` named some other resource.
    ResourceType(String),
    /// The blocking database task panicked or was cancelled.
    Task(JoinError),
}

impl From<ReunionError> for ApiError {
    fn from(err: ReunionError) -> Self {
        ApiError::Reunion(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Payload(rejection.body_text())
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        ApiError::Task(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Reunion(ReunionError::NotFound { .. }) => StatusCode::NOT_FOUND.into_response(),
            ApiError::Reunion(ReunionError::Discarded { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY.into_response()
            }
            ApiError::Reunion(ReunionError::Validation(errors)) => {
                warn!(fields = ?errors.fields(), "request failed validation");
                error_document(StatusCode::BAD_REQUEST, ErrorDocument::from_validation(&errors))
            }
            ApiError::Payload(detail) => {
                warn!(%detail, "malformed request document");
                error_document(
                    StatusCode::BAD_REQUEST,
                    ErrorDocument::single(400, "Invalid document", detail, Some("/data")),
                )
            }
            ApiError::ResourceType(kind) => {
                warn!(%kind, "request document names another resource type");
                error_document(
                    StatusCode::BAD_REQUEST,
                    ErrorDocument::single(
                        400,
                        "Invalid type",
                        format!("expected type `{RESOURCE_TYPE}`, got `{kind}`"),
                        Some("/data/type"),
                    ),
                )
            }
            ApiError::Reunion(err) => {
                error!(error = %err, "request failed");
                internal_error()
            }
            ApiError::Task(err) => {
                error!(error = %err, "database task failed");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    error_document(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorDocument::single(500, "Internal server error", "internal server error", None),
    )
}

fn error_document(status: StatusCode, doc: ErrorDocument) -> Response {
    (status, [(header::CONTENT_TYPE, JSONAPI_MEDIA_TYPE)], Json(doc)).into_response()
}
