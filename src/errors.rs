use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}. Please try again")]
    Retryable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::AuthRequired | DomainError::InvalidCredentials => {
                AppError::Unauthorized(e.to_string())
            }
            DomainError::EmailTaken => AppError::Conflict(e.to_string()),
            DomainError::NotFound => AppError::NotFound,
            DomainError::SinkWrite(msg) => AppError::Retryable(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Unauthorized(_) => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Conflict(_) => HttpResponse::Conflict().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Retryable(_) => {
                HttpResponse::ServiceUnavailable().json(serde_json::json!({
                    "error": "There was an issue placing your order. Please try again"
                }))
            }
            AppError::Internal(_) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn validation_returns_400() {
        let resp = AppError::Validation("Your cart is empty".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_returns_401() {
        let resp = AppError::Unauthorized("no session".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_found_returns_404() {
        assert_eq!(
            AppError::NotFound.error_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn conflict_returns_409() {
        let resp = AppError::Conflict("email taken".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn retryable_returns_503_and_masks_the_cause() {
        let err = AppError::Retryable("connection reset".to_string());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn auth_required_maps_to_unauthorized() {
        let app_err: AppError = DomainError::AuthRequired.into();
        assert!(matches!(app_err, AppError::Unauthorized(_)));
    }

    #[test]
    fn invalid_credentials_maps_to_unauthorized() {
        let app_err: AppError = DomainError::InvalidCredentials.into();
        assert!(matches!(app_err, AppError::Unauthorized(_)));
    }

    #[test]
    fn sink_write_maps_to_retryable() {
        let app_err: AppError = DomainError::SinkWrite("boom".to_string()).into();
        assert!(matches!(app_err, AppError::Retryable(_)));
    }

    #[test]
    fn email_taken_maps_to_conflict() {
        let app_err: AppError = DomainError::EmailTaken.into();
        assert!(matches!(app_err, AppError::Conflict(_)));
    }

    #[test]
    fn domain_validation_keeps_its_message() {
        let app_err: AppError = DomainError::validation("Passwords do not match").into();
        assert_eq!(app_err.to_string(), "Passwords do not match");
    }
}
