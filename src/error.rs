use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Failures surfaced by the data layer. Each kind maps to exactly one
/// HTTP status; nothing is collapsed into a generic bad request.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Validation(String),

    /// The cascading-delete transaction could not commit. Fully rolled
    /// back, so the caller may retry.
    #[error("transaction failed: {0}")]
    Transaction(#[source] sqlx::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Transaction(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::NotFound { entity, id } => {
                warn!(%entity, %id, "entity not found");
            }
            AppError::Validation(message) => {
                warn!(%message, "request rejected");
            }
            AppError::Transaction(e) => {
                error!(error = %e, "transaction failed");
            }
            AppError::Database(e) => {
                error!(error = %e, "database error");
            }
        }
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::not_found("itinerary", uuid::Uuid::nil());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_string(),
            "itinerary not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::validation("cost must not be negative");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn transaction_failure_maps_to_500() {
        let err = AppError::Transaction(sqlx::Error::PoolClosed);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
