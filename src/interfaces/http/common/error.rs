//! Domain error → HTTP status mapping

use axum::http::StatusCode;
use axum::Json;
use tracing::error;

use super::ApiResponse;
use crate::domain::DomainError;

/// Error half of every handler result
pub type ApiError<T> = (StatusCode, Json<ApiResponse<T>>);

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError<T>>;

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_)
        | DomainError::InvalidStatus(_)
        | DomainError::InvalidQuantity(_)
        | DomainError::AmountOutOfRange(_)
        | DomainError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Invariant(_) | DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn domain_error<T>(err: DomainError) -> ApiError<T> {
    let status = status_for(&err);
    if status.is_server_error() {
        error!(error = %err, "Request failed");
        return (status, Json(ApiResponse::error("Internal server error")));
    }
    (status, Json(ApiResponse::error(err.to_string())))
}

/// A missing customer or service item named in a request body is the
/// caller's mistake, not a missing resource.
pub fn reference_error<T>(err: DomainError) -> ApiError<T> {
    match err {
        DomainError::NotFound { .. } => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(err.to_string())),
        ),
        other => domain_error(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(status_for(&DomainError::order_not_found(1)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&DomainError::InvalidStatus("SHIPPED".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::InvalidTransition {
                from: "DELIVERED".into(),
                to: "PENDING".into()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(&DomainError::Conflict("x".into())), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&DomainError::AmountOutOfRange("total".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::Invariant("total".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn referenced_entity_is_bad_request() {
        let (status, Json(body)) = reference_error::<()>(DomainError::customer_not_found(999));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.unwrap().contains("999"));
    }

    #[test]
    fn server_errors_hide_details() {
        let (status, Json(body)) = domain_error::<()>(DomainError::Storage("disk on fire".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }
}
