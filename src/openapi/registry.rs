//! Route registry: every operation is mounted on the router and recorded for the API
//! document in the same call, so the two cannot drift apart.

use crate::openapi::document::{ApiInfo, OpenApiDoc};
use crate::openapi::operation::{HttpMethod, OperationSpec};
use axum::{handler::Handler, routing::on, Router};
use std::collections::HashSet;

pub struct ApiRegistry<S> {
    router: Router<S>,
    operations: Vec<OperationSpec>,
    routes: HashSet<(HttpMethod, String)>,
}

impl<S> Default for ApiRegistry<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ApiRegistry<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        ApiRegistry {
            router: Router::new(),
            operations: Vec::new(),
            routes: HashSet::new(),
        }
    }

    /// Mount `handler` for `spec.method` + `spec.path` and record `spec`.
    /// A second registration of the same method and path is logged and ignored.
    pub fn operation<H, T>(mut self, spec: OperationSpec, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        if !self.routes.insert((spec.method, spec.path.clone())) {
            tracing::error!(
                method = spec.method.as_str(),
                path = %spec.path,
                operation_id = %spec.operation_id,
                "duplicate (method, path); ignoring registration"
            );
            return self;
        }
        tracing::debug!(
            method = spec.method.as_str(),
            path = %spec.path,
            operation_id = %spec.operation_id,
            "registered operation"
        );
        let route_path = to_router_path(&spec.path);
        self.router = self.router.route(&route_path, on(spec.method.filter(), handler));
        self.operations.push(spec);
        self
    }

    pub fn operations(&self) -> &[OperationSpec] {
        &self.operations
    }

    pub fn document(&self, info: ApiInfo) -> OpenApiDoc {
        OpenApiDoc::build(info, &self.operations)
    }

    pub fn into_router(self) -> Router<S> {
        self.router
    }
}

/// `/users/{id}` → `/users/:id`.
pub fn to_router_path(path: &str) -> String {
    path.split('/')
        .map(|seg| match seg.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => format!(":{}", name),
            None => seg.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
