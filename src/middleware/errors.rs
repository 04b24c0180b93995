//! Global not-found and error responders.

use crate::config::Environment;
use crate::error::ErrorReport;
use crate::response::{ErrorBody, MessageBody, NOT_FOUND_MESSAGE};
use axum::{
    extract::{Request, State},
    http::{StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageBody::new(format!("{} - {}", NOT_FOUND_MESSAGE, uri.path()))),
    )
}

/// Renders any response carrying an `ErrorReport` as `{ message, stack? }`.
/// The stack is withheld in production; a non-error status becomes 500.
pub async fn render_errors(State(environment): State<Environment>, req: Request, next: Next) -> Response {
    let res = next.run(req).await;
    let Some(report) = res.extensions().get::<ErrorReport>().cloned() else {
        return res;
    };
    let status = if report.status.is_client_error() || report.status.is_server_error() {
        report.status
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let body = ErrorBody {
        message: report.message,
        stack: (!environment.is_production()).then_some(report.stack),
    };
    let (mut parts, _) = res.into_parts();
    parts.extensions.remove::<ErrorReport>();
    let mut rendered = (status, Json(body)).into_response();
    for (name, value) in parts.headers.iter() {
        if name != axum::http::header::CONTENT_TYPE && name != axum::http::header::CONTENT_LENGTH {
            rendered.headers_mut().insert(name.clone(), value.clone());
        }
    }
    rendered
}

/// Turns a handler panic into an error report for `render_errors`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked");
    ErrorReport::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR_MESSAGE,
        format!("panicked at: {}", detail),
    )
    .into_response()
}
