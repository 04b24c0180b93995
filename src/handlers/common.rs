//! Health, readiness and API documentation endpoints.

use crate::openapi::OpenApiDoc;
use crate::response::{MessageBody, HEALTH_MESSAGE};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Extension, Json,
};
use std::sync::Arc;

/// Reference page rendering `/doc` with Scalar.
const REFERENCE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1"/>
  <title>API Reference</title>
</head>
<body>
  <script id="api-reference" data-url="/doc" data-configuration='{"theme":"deepSpace","layout":"classic"}'></script>
  <script src="https://cdn.jsdelivr.net/npm/@scalar/api-reference"></script>
</body>
</html>"#;

pub async fn health() -> Json<MessageBody> {
    Json(MessageBody::new(HEALTH_MESSAGE))
}

pub async fn ready(State(state): State<AppState>) -> Result<Json<MessageBody>, (StatusCode, Json<MessageBody>)> {
    if let Err(e) = state.store.ping().await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err((StatusCode::SERVICE_UNAVAILABLE, Json(MessageBody::new("Database unavailable"))));
    }
    Ok(Json(MessageBody::new("ok")))
}

pub async fn doc(Extension(doc): Extension<Arc<OpenApiDoc>>) -> Json<OpenApiDoc> {
    Json(doc.as_ref().clone())
}

pub async fn reference() -> Html<&'static str> {
    Html(REFERENCE_HTML)
}
