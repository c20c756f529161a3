//! Error types for the dashboard service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Dashboard Error Enum ==
/// Unified error type for request handling.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A local JSON store could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// The cache backend rejected an operation
    #[error("Cache error: {0}")]
    Cache(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            DashboardError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            DashboardError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            DashboardError::Storage(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            DashboardError::Cache(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            DashboardError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(ErrorResponse::new(message));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the dashboard service.
pub type Result<T> = std::result::Result<T, DashboardError>;
