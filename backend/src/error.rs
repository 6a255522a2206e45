//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! Missing persons map to a bare 404; every other error carries a JSON body.

use crate::person::{PersonId, StoreError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Person with the given ID was not found
    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),

    /// The person store failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::PersonNotFound(_) => return StatusCode::NOT_FOUND.into_response(),
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!(error = %self, "Request failed");

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
