use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::ValidationErrors;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed the movie schema; carries the aggregated description
    #[error("{0}")]
    Validation(String),

    #[error("Movie not found")]
    MovieNotFound,

    #[error("Not allowed by CORS")]
    OriginRejected,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            ApiError::Validation(_) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(&message))).into_response()
            }
            ApiError::MovieNotFound => {
                (StatusCode::NOT_FOUND, Json(MessageResponse::new(&message))).into_response()
            }
            ApiError::OriginRejected => {
                (StatusCode::FORBIDDEN, Json(ErrorResponse::new(&message))).into_response()
            }
            ApiError::Internal(e) => {
                log::error!("Internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(&message)),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MovieNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::OriginRejected.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_is_kept_verbatim() {
        let err = ApiError::Validation("year: Required; poster: Poster must be a valid url".into());
        assert_eq!(
            err.to_string(),
            "year: Required; poster: Poster must be a valid url"
        );
    }
}
