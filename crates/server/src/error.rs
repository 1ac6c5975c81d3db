use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::{LeaderboardError, QuestionServiceError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use thiserror::Error;
use tracing::warn;

use crate::config::ConfigError;

/// Failure of a single request, rendered as `{"message", "errors"?}`.
#[derive(Debug, Error)]
pub enum ApiFailure {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl ApiFailure {
    fn validation(message: &str, field: &'static str, detail: String) -> Self {
        Self::Validation {
            message: message.to_owned(),
            errors: vec![FieldError {
                field,
                message: detail,
            }],
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiFailure::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message,
                    errors: None,
                },
            ),
            ApiFailure::Validation { message, errors } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message,
                    errors: Some(errors),
                },
            ),
            ApiFailure::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message,
                    errors: None,
                },
            ),
            ApiFailure::Internal(detail) => {
                warn!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: "Internal server error".into(),
                        errors: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiFailure {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiFailure {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiFailure {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

fn storage_failure(err: &StorageError) -> ApiFailure {
    match err {
        StorageError::NotFound => ApiFailure::NotFound("Not found".into()),
        other => ApiFailure::Internal(other.to_string()),
    }
}

impl From<QuestionServiceError> for ApiFailure {
    fn from(err: QuestionServiceError) -> Self {
        match err {
            QuestionServiceError::Invalid(invalid) => {
                Self::validation("Invalid question data", invalid.field(), invalid.to_string())
            }
            QuestionServiceError::NotFound(_) => Self::NotFound("Question not found".into()),
            QuestionServiceError::Storage(storage) => storage_failure(&storage),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<LeaderboardError> for ApiFailure {
    fn from(err: LeaderboardError) -> Self {
        match err {
            LeaderboardError::Invalid(invalid) => {
                Self::validation("Invalid game session data", invalid.field(), invalid.to_string())
            }
            LeaderboardError::Storage(storage) => storage_failure(&storage),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Errors that stop the server from starting or keep it from serving.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("server io error: {0}")]
    Io(#[from] std::io::Error),
}
