use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::routes::Envelope;
use crate::store::StoreError;
use crate::upload::UploadError;

// ============================================================================
// API Error Taxonomy
// ============================================================================
//
// Every failure a handler can produce, mapped to a status code and rendered
// as the uniform `{success:false, message}` envelope. Nothing escapes a
// handler unwrapped.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Item not found")]
    NotFound,

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::InvalidKey(key) => ApiError::Validation(format!("invalid record key: {key}")),
            other => ApiError::Store(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Upload(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(Envelope::failure(&self.to_string()))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
