//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_core::DomainError;
use quill_core::validation::PostValidationError;
use quill_shared::{ErrorResponse, FieldErrorBody};
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Validation(PostValidationError),
    /// Post creation failed in the store. The detail stays in the logs.
    CreateFailed,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(err) => write!(f, "Validation errors: {}", err),
            AppError::CreateFailed => write!(f, "{}", DomainError::CreateFailed),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::CreateFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation(err) => {
                let errors = err
                    .violations()
                    .iter()
                    .map(|v| FieldErrorBody {
                        field: v.field.as_str().to_string(),
                        code: v.constraint.code().to_string(),
                        message: v.message.clone(),
                    })
                    .collect();
                ErrorResponse::validation_failed(err.to_string()).with_errors(errors)
            }
            AppError::CreateFailed => {
                ErrorResponse::internal_error(DomainError::CreateFailed.to_string())
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Validation(err) => AppError::Validation(err),
            DomainError::CreateFailed => AppError::CreateFailed,
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
