//! Typed errors and HTTP mapping.

use crate::response::{MessageBody, ValidationErrorBody, NOT_FOUND_MESSAGE};
use crate::validation::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    /// Body could not be read as JSON; carries the rejection's own status (400, 413, 415).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound | AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Rejected { status, .. } => *status,
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An unclassified failure travelling in response extensions to the global error
/// middleware, which decides whether `stack` is exposed.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub message: String,
    pub stack: String,
}

impl ErrorReport {
    pub fn new(status: StatusCode, message: impl Into<String>, stack: impl Into<String>) -> Self {
        ErrorReport {
            status,
            message: message.into(),
            stack: stack.into(),
        }
    }

    pub fn from_error(status: StatusCode, err: &(dyn std::error::Error + 'static)) -> Self {
        ErrorReport::new(status, err.to_string(), source_chain(err))
    }
}

impl IntoResponse for ErrorReport {
    fn into_response(self) -> Response {
        let status = self.status;
        let mut res = (status, Json(MessageBody::new(self.message.clone()))).into_response();
        res.extensions_mut().insert(self);
        res
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Validation(e) => (status, Json(ValidationErrorBody::from(e))).into_response(),
            AppError::NotFound | AppError::Db(sqlx::Error::RowNotFound) => {
                (status, Json(MessageBody::new(NOT_FOUND_MESSAGE))).into_response()
            }
            other => {
                if status.is_server_error() {
                    tracing::error!(error = %other, "request failed");
                } else {
                    tracing::warn!(error = %other, "request rejected");
                }
                ErrorReport::from_error(status, &other).into_response()
            }
        }
    }
}

/// Display of `err` followed by each `source()`, one per line.
pub fn source_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = format!("Error: {}", err);
    let mut cur = err.source();
    while let Some(cause) = cur {
        out.push_str("\n    caused by: ");
        out.push_str(&cause.to_string());
        cur = cause.source();
    }
    out
}
