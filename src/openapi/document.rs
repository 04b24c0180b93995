//! OpenAPI document assembled from recorded operation specs.

use crate::openapi::operation::{OperationSpec, APPLICATION_JSON};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const OPENAPI_VERSION: &str = "3.1.0";

#[derive(Debug, Clone, Serialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for ApiInfo {
    fn default() -> Self {
        ApiInfo {
            title: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: Some(env!("CARGO_PKG_DESCRIPTION").to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Components {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenApiDoc {
    pub openapi: &'static str,
    pub info: ApiInfo,
    /// path → method → operation object
    pub paths: BTreeMap<String, BTreeMap<String, Value>>,
    pub components: Components,
}

impl OpenApiDoc {
    pub fn build(info: ApiInfo, operations: &[OperationSpec]) -> Self {
        let mut paths: BTreeMap<String, BTreeMap<String, Value>> = BTreeMap::new();
        let mut components = Components::default();

        for op in operations {
            paths
                .entry(op.path.clone())
                .or_default()
                .insert(op.method.as_str().to_string(), operation_object(op));

            for (name, schema) in &op.schemas {
                if components.schemas.contains_key(name) {
                    continue;
                }
                match serde_json::to_value(schema) {
                    Ok(v) => {
                        components.schemas.insert(name.clone(), v);
                    }
                    Err(e) => tracing::error!(schema = %name, error = %e, "failed to serialize schema"),
                }
            }
        }
        tracing::info!(operations = operations.len(), schemas = components.schemas.len(), "built api document");

        OpenApiDoc {
            openapi: OPENAPI_VERSION,
            info,
            paths,
            components,
        }
    }
}

fn operation_object(op: &OperationSpec) -> Value {
    let mut obj = Map::new();
    obj.insert("operationId".into(), Value::String(op.operation_id.clone()));
    if let Some(summary) = &op.summary {
        obj.insert("summary".into(), Value::String(summary.clone()));
    }
    if let Some(description) = &op.description {
        obj.insert("description".into(), Value::String(description.clone()));
    }
    if !op.tags.is_empty() {
        obj.insert("tags".into(), Value::Array(op.tags.iter().cloned().map(Value::String).collect()));
    }

    if !op.params.is_empty() {
        let params = op
            .params
            .iter()
            .map(|p| {
                let mut param = Map::new();
                param.insert("name".into(), Value::String(p.name.clone()));
                param.insert("in".into(), Value::String("path".into()));
                param.insert("required".into(), Value::Bool(true));
                if let Some(d) = &p.description {
                    param.insert("description".into(), Value::String(d.clone()));
                }
                param.insert("schema".into(), serde_json::json!({ "type": p.param_type }));
                Value::Object(param)
            })
            .collect();
        obj.insert("parameters".into(), Value::Array(params));
    }

    if let Some(body) = &op.request_body {
        let mut rb = Map::new();
        if let Some(d) = &body.description {
            rb.insert("description".into(), Value::String(d.clone()));
        }
        rb.insert("required".into(), Value::Bool(body.required));
        let mut content = Map::new();
        content.insert(APPLICATION_JSON.to_string(), serde_json::json!({ "schema": body.schema.to_json() }));
        rb.insert("content".into(), Value::Object(content));
        obj.insert("requestBody".into(), Value::Object(rb));
    }

    let mut responses = Map::new();
    for r in &op.responses {
        let mut resp = Map::new();
        resp.insert("description".into(), Value::String(r.description.clone()));
        if let Some(schema) = &r.schema {
            let mut content = Map::new();
            content.insert(APPLICATION_JSON.to_string(), serde_json::json!({ "schema": schema.to_json() }));
            resp.insert("content".into(), Value::Object(content));
        }
        responses.insert(r.status.to_string(), Value::Object(resp));
    }
    obj.insert("responses".into(), Value::Object(responses));

    Value::Object(obj)
}
