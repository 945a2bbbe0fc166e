// src/ports/http/error.rs
use std::any::Any;
use std::fmt::{Debug, Display};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::config::ErrorVerbosity;
use crate::constants::GENERIC_ERROR_MESSAGE;
use crate::domain::DomainError;

pub const FOLDER_NOT_FOUND: &str = "Folder does not exist";
pub const NOTE_NOT_FOUND: &str = "Note does not exist";

/// `{ "error": { "message": ... } }`, the body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                message: message.into(),
                details: None,
            },
        }
    }

    fn detailed(failure: &UnexpectedFailure) -> Self {
        Self {
            error: ErrorBody {
                message: failure.message.clone(),
                details: Some(failure.details.clone()),
            },
        }
    }
}

/// Failure carried on a 500 response until the catch-all renders it
#[derive(Debug, Clone)]
pub struct UnexpectedFailure {
    message: String,
    details: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(&'static str),
    Unexpected(UnexpectedFailure),
}

impl ApiError {
    pub fn unexpected<E: Display + Debug>(err: E) -> Self {
        ApiError::Unexpected(UnexpectedFailure {
            message: err.to_string(),
            details: format!("{err:?}"),
        })
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::FolderNotFound(_) => ApiError::NotFound(FOLDER_NOT_FOUND),
            DomainError::NoteNotFound(_) => ApiError::NotFound(NOTE_NOT_FOUND),
            DomainError::MissingFolderName => {
                ApiError::BadRequest("Folder name is required".to_string())
            }
            DomainError::MissingField(field) => {
                ApiError::BadRequest(format!("Missing {field} in request body."))
            }
            DomainError::EmptyFolderUpdate => {
                ApiError::BadRequest("Request body requires folder name".to_string())
            }
            DomainError::EmptyNoteUpdate => ApiError::BadRequest(
                "Request body must contain title, folder id, and content.".to_string(),
            ),
            DomainError::MalformedBody(_) => ApiError::BadRequest(err.to_string()),
            DomainError::Storage(_) => ApiError::unexpected(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorEnvelope::new(message))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorEnvelope::new(message))).into_response()
            }
            ApiError::Unexpected(failure) => {
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorEnvelope::new(GENERIC_ERROR_MESSAGE)),
                )
                    .into_response();
                response.extensions_mut().insert(failure);
                response
            }
        }
    }
}

/// Catch-all responder: renders every unexpected failure according to the configured verbosity
pub async fn catch_all(
    State(verbosity): State<ErrorVerbosity>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    let Some(failure) = response.extensions().get::<UnexpectedFailure>().cloned() else {
        return response;
    };
    error!(%method, path = %path, message = %failure.message, "Request failed unexpectedly");

    let envelope = match verbosity {
        ErrorVerbosity::Detailed => ErrorEnvelope::detailed(&failure),
        ErrorVerbosity::Generic => ErrorEnvelope::new(GENERIC_ERROR_MESSAGE),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
}

/// Turns a handler panic into an unexpected failure for `catch_all`
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "handler panicked".to_string());
    ApiError::Unexpected(UnexpectedFailure {
        details: format!("panic: {message}"),
        message,
    })
    .into_response()
}
