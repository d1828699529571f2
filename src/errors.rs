use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// An operator action refused before reaching the backend.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Backend request failed: {0}")]
    Upstream(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(what) => AppError::NotFound(what),
            DomainError::InvalidTransition(_)
            | DomainError::NotCancellable(_)
            | DomainError::CategoryNotEmpty { .. } => AppError::Rejected(e.to_string()),
            DomainError::InvalidInput(msg) => AppError::BadRequest(msg),
            DomainError::Unauthorized | DomainError::InvalidCredentials => {
                AppError::Unauthorized(e.to_string())
            }
            DomainError::Remote(msg) => AppError::Upstream(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Rejected(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;
    use actix_web::ResponseError;

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound("order 1".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn local_rejections_map_to_conflict() {
        let err: AppError = DomainError::NotCancellable(OrderStatus::Completed).into();
        assert!(matches!(err, AppError::Rejected(_)));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Cannot cancel an order that is Completed");

        let err: AppError = DomainError::InvalidTransition(OrderStatus::Cancelled).into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err: AppError = DomainError::CategoryNotEmpty {
            name: "Drinks".to_string(),
            products: 2,
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn remote_failure_maps_to_bad_gateway() {
        let err: AppError = DomainError::Remote("timeout".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "Backend request failed: timeout");
    }

    #[test]
    fn auth_failures_map_to_401() {
        let err: AppError = DomainError::Unauthorized.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        let err: AppError = DomainError::InvalidCredentials.into();
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[test]
    fn domain_invalid_input_maps_to_bad_request() {
        let app_err: AppError = DomainError::InvalidInput("bad value".to_string()).into();
        assert!(matches!(app_err, AppError::BadRequest(_)));
    }
}
