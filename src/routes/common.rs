//! Common routes: health, readiness, and the API document endpoints.

use crate::handlers::common::{doc, health, ready, reference};
use crate::openapi::{ApiRegistry, OpenApiDoc, OperationSpec};
use crate::response::MessageBody;
use crate::state::AppState;
use axum::{routing::get, Extension, Router};
use std::sync::Arc;

/// GET /health and GET /ready.
pub fn register(registry: ApiRegistry<AppState>) -> ApiRegistry<AppState> {
    registry
        .operation(
            OperationSpec::get("/health", "health")
                .summary("API health")
                .tag("Root")
                .json_response::<MessageBody>(200, "API health"),
            health,
        )
        .operation(
            OperationSpec::get("/ready", "ready")
                .summary("Readiness, including a database round-trip")
                .tag("Root")
                .json_response::<MessageBody>(200, "Ready")
                .json_response::<MessageBody>(503, "Database unavailable"),
            ready,
        )
}

/// GET /doc (OpenAPI JSON) and GET /reference (HTML). Not part of the document itself.
pub fn docs_routes(api_doc: Arc<OpenApiDoc>) -> Router<AppState> {
    Router::new()
        .route("/doc", get(doc))
        .route("/reference", get(reference))
        .layer(Extension(api_doc))
}
