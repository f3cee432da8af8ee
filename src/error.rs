use crate::models::ValidationError;
use crate::services::StoreError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the product endpoints, rendered as `{"message": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Product \"{0}\" not found")]
    NotFound(String),
    #[error("Product \"{0}\" is already registered")]
    Conflict(String),
    /// The cause is logged, never sent to the client.
    #[error("Cannot complete the operation")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            message: self.to_string(),
        })
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AlreadyExists(name) => ApiError::Conflict(name),
            e => {
                log::error!("Product store failure: {}", e);
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<mediator::error::Error> for ApiError {
    fn from(e: mediator::error::Error) -> Self {
        log::error!("Unable to dispatch request: {}", e);
        ApiError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::from(ValidationError::NoFields).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(StoreError::AlreadyExists("tea".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("tea".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::Task("cancelled".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_details_stay_out_of_the_message() {
        let err = ApiError::from(StoreError::Task("disk on fire".into()));
        assert_eq!(err.to_string(), "Cannot complete the operation");
    }

    #[test]
    fn dispatch_failures_are_internal() {
        let err = ApiError::from(mediator::error::Error::from(mediator::error::ErrorKind::NotFound));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Cannot complete the operation");
    }

    #[test]
    fn conflict_names_the_product() {
        let err = ApiError::from(StoreError::AlreadyExists("bread".into()));
        assert_eq!(err.to_string(), "Product \"bread\" is already registered");
    }
}
