//! Custom error types for the coffee service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::validation::ValidationReport;

/// Custom error type for the coffee service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Payload violated one or more field rules
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Requested coffee does not exist
    #[error("{0}")]
    NotFound(String),

    /// Missing or unparseable payload
    #[error("{0}")]
    MalformedInput(String),

    /// Storage failure; carries only the public message
    #[error("{0}")]
    Storage(&'static str),
}

impl ApiError {
    pub fn coffee_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("Coffee with ID {} not found", id))
    }
}

impl From<ValidationReport> for ApiError {
    fn from(report: ValidationReport) -> Self {
        ApiError::Validation(report.errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            ApiError::Validation(errors) => json!({
                "success": false,
                "message": self.to_string(),
                "errors": errors,
            }),
            _ => json!({
                "success": false,
                "message": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_joins_errors() {
        let error = ApiError::Validation(vec![
            "name is required".to_string(),
            "price must be greater than 0".to_string(),
        ]);
        assert_eq!(
            error.to_string(),
            "Validation failed: name is required, price must be greater than 0"
        );
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::coffee_not_found("42").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::MalformedInput("Invalid JSON in request body".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Storage("Failed to list coffees")
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
