use crate::domain::documents::StoreError;
use crate::shared::validation::ValidationFailure;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(ValidationFailure),
    #[error("Uniqueness conflict: {field} is already taken")]
    UniquenessConflict { field: String },
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        AppError::ValidationError(failure)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey { field } => AppError::UniquenessConflict { field },
            StoreError::Database(e) => AppError::DatabaseError(e),
            other => AppError::InternalServerError(other.into()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalServerError(err.into())
    }
}

/// JSON:API error document.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub errors: Vec<JsonApiError>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JsonApiError {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<JsonApiErrorSource>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JsonApiErrorSource {
    pub pointer: String,
}

impl JsonApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status: status.as_u16().to_string(),
            code: None,
            detail: detail.into(),
            source: None,
        }
    }

    fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    fn with_pointer(mut self, field: &str) -> Self {
        self.source = Some(JsonApiErrorSource {
            pointer: format!("/data/attributes/{}", field.replace('.', "/")),
        });
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            AppError::ValidationError(failure) => {
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                let errors = failure
                    .violations
                    .into_iter()
                    .map(|v| {
                        JsonApiError::new(status, v.message)
                            .with_code(v.rule.code())
                            .with_pointer(&v.field)
                    })
                    .collect();
                (status, errors)
            }
            AppError::UniquenessConflict { field } => {
                let status = StatusCode::CONFLICT;
                let error = JsonApiError::new(status, format!("{field} is already taken"))
                    .with_code("unique")
                    .with_pointer(&field);
                (status, vec![error])
            }
            AppError::NotFound(msg) => {
                let status = StatusCode::NOT_FOUND;
                (status, vec![JsonApiError::new(status, msg)])
            }
            AppError::DatabaseError(e) => {
                tracing::error!("Database error: {:?}", e);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (status, vec![JsonApiError::new(status, "Database error")])
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (status, vec![JsonApiError::new(status, "Internal server error")])
            }
        };

        (status, Json(ErrorResponse { errors })).into_response()
    }
}
