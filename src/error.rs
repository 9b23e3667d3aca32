use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Request-level failure taxonomy. Every variant maps to exactly one status
/// code; nothing here is retried or queued.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not logged in.")]
    Unauthorized,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid identity token: {0}")]
    InvalidToken(String),
    #[error("Account domain is not allowed.")]
    DomainNotAllowed,
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<rusqlite::Error> for ApiError {
    fn from(e: rusqlite::Error) -> Self {
        ApiError::Storage(e.to_string())
    }
}

impl From<r2d2::Error> for ApiError {
    fn from(e: r2d2::Error) -> Self {
        ApiError::Storage(e.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            ApiError::DomainNotAllowed => StatusCode::UNAUTHORIZED,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Storage(msg) = self {
            log::error!("Storage error surfaced to client: {}", msg);
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::InvalidToken("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::DomainNotAllowed.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Storage("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
