//! Error responses.
//!
//! Business rule failures go out in the `{ success: false, message }`
//! envelope. Transport problems (bad input, missing session) use RFC 7807.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use roteirum_core::error::{DomainError, RepoError};
use roteirum_core::ports::AuthError;
use roteirum_shared::{ApiResponse, ErrorResponse};

use crate::observability::RequestId;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// A rejected operation, reported in the response envelope.
    Domain(DomainError),
    /// Malformed input that never reached a service.
    BadRequest {
        detail: String,
        request_id: Option<String>,
    },
}

impl AppError {
    /// A bad request tied to the request's correlation id.
    pub fn bad_request(req: &HttpRequest, detail: impl Into<String>) -> Self {
        AppError::BadRequest {
            detail: detail.into(),
            request_id: RequestId::of(req),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Domain(err) => write!(f, "{}", err),
            AppError::BadRequest { detail, .. } => write!(f, "Bad request: {}", detail),
        }
    }
}

fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::AlreadyLiked
        | DomainError::NotLiked
        | DomainError::AlreadySaved
        | DomainError::NotSaved => StatusCode::CONFLICT,
        DomainError::EmptyComment | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::InvalidCredentials | DomainError::InactiveAccount => {
            StatusCode::UNAUTHORIZED
        }
        DomainError::Auth(AuthError::HashingError(_)) | DomainError::Storage(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Auth(_) => StatusCode::UNAUTHORIZED,
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Domain(err) => domain_status(err),
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::Domain(err) if status.is_server_error() => {
                tracing::error!(error = %err, "Request failed");
                HttpResponse::build(status).json(ErrorResponse::internal_error())
            }
            AppError::Domain(err) => {
                HttpResponse::build(status).json(ApiResponse::failure(err.to_string()))
            }
            AppError::BadRequest { detail, request_id } => {
                let mut error = ErrorResponse::bad_request(detail);
                if let Some(id) = request_id {
                    error = error.with_request_id(id);
                }
                HttpResponse::build(status).json(error)
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::Domain(err)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::Domain(DomainError::Storage(err))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_domain_status_mapping() {
        let cases = [
            (DomainError::post_not_found(Uuid::nil()), StatusCode::NOT_FOUND),
            (DomainError::AlreadyLiked, StatusCode::CONFLICT),
            (DomainError::NotSaved, StatusCode::CONFLICT),
            (DomainError::EmptyComment, StatusCode::BAD_REQUEST),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                DomainError::Storage(RepoError::Unavailable("down".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status_code(), expected);
        }
    }
}
