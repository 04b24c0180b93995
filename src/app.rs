//! Router assembly: documented operations, docs endpoints, fallback and middleware.

use crate::middleware::{handle_panic, not_found, render_errors, request_id, trace_layer, MakeRequestUuid};
use crate::openapi::{ApiInfo, ApiRegistry};
use crate::routes;
use crate::state::AppState;
use axum::{middleware::from_fn_with_state, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};

/// Upper bound on request bodies.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Every documented operation of the service.
pub fn api_registry() -> ApiRegistry<AppState> {
    let registry = routes::common::register(ApiRegistry::new());
    routes::users::register(registry)
}

pub fn create_app(state: AppState) -> Router {
    let registry = api_registry();
    let api_doc = Arc::new(registry.document(ApiInfo::default()));
    tracing::debug!(operations = registry.operations().len(), "operations registered");

    registry
        .into_router()
        .merge(routes::common::docs_routes(api_doc))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id::header(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(request_id::header()))
                .layer(trace_layer())
                .layer(from_fn_with_state(state.environment(), render_errors))
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES)),
        )
        .with_state(state)
}
