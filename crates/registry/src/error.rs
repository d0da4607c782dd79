//! Unified error handling with Sentry integration.
//!
//! Provides an `AppError` type that captures server errors to Sentry before
//! responding. Every failure leaves the API as `{"error": "..."}`; store
//! diagnostics never reach the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::{RegistrationError, RegistrationStage, RepositoryError};
use crate::services::RegistryError;

/// Application-level error type for the registry API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Registration transaction rolled back.
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON body for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Validation(e) => Self::BadRequest(e.to_string()),
            RegistryError::Registration(e) => Self::Registration(e),
            RegistryError::NotFound(person_id) => {
                Self::NotFound(format!("client with person id {person_id}"))
            }
            RegistryError::Repository(e) => Self::Database(e),
        }
    }
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Registration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to show to the caller.
    fn public_message(&self) -> String {
        match self {
            Self::Database(_) => "Internal server error".to_string(),
            Self::Registration(err) => registration_message(err).to_string(),
            _ => self.to_string(),
        }
    }
}

const fn registration_message(err: &RegistrationError) -> &'static str {
    match err.stage() {
        Some(RegistrationStage::Person) => "Failed to register person (duplicate email?)",
        Some(RegistrationStage::Individual | RegistrationStage::Organization) => {
            "Failed to register person details (duplicate tax id?)"
        }
        Some(RegistrationStage::Client) => "Failed to register client",
        None => "Failed to register client (transaction aborted)",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
