//! Declarative description of one HTTP operation: method, path, inputs and the
//! response shape per status code.

use axum::routing::MethodFilter;
use serde_json::{json, Value};
use utoipa::openapi::{schema::Schema, RefOr};
use utoipa::{PartialSchema, ToSchema};

pub const APPLICATION_JSON: &str = "application/json";

/// Component schemas an operation refers to, including transitive dependencies.
pub type SchemaCollection = Vec<(String, RefOr<Schema>)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }

    pub fn filter(self) -> MethodFilter {
        match self {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Post => MethodFilter::POST,
            HttpMethod::Patch => MethodFilter::PATCH,
            HttpMethod::Delete => MethodFilter::DELETE,
        }
    }
}

/// A path parameter; always required.
#[derive(Clone, Debug)]
pub struct ParamSpec {
    pub name: String,
    pub description: Option<String>,
    /// JSON Schema type, e.g. `integer`.
    pub param_type: &'static str,
}

/// Where a body's schema comes from: a named component, optionally wrapped in an array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodySchema {
    Component(String),
    ArrayOf(String),
}

impl BodySchema {
    pub fn to_json(&self) -> Value {
        match self {
            BodySchema::Component(name) => json!({ "$ref": component_ref(name) }),
            BodySchema::ArrayOf(name) => json!({ "type": "array", "items": { "$ref": component_ref(name) } }),
        }
    }
}

pub fn component_ref(name: &str) -> String {
    format!("#/components/schemas/{}", name)
}

#[derive(Clone, Debug)]
pub struct RequestBodySpec {
    pub description: Option<String>,
    pub schema: BodySchema,
    pub required: bool,
}

#[derive(Clone, Debug)]
pub struct ResponseSpec {
    pub status: u16,
    pub description: String,
    /// `None` for bodiless responses such as 204.
    pub schema: Option<BodySchema>,
}

#[derive(Clone, Debug)]
pub struct OperationSpec {
    pub method: HttpMethod,
    /// OpenAPI-style path, e.g. `/users/{id}`.
    pub path: String,
    pub operation_id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub params: Vec<ParamSpec>,
    pub request_body: Option<RequestBodySpec>,
    pub responses: Vec<ResponseSpec>,
    pub schemas: SchemaCollection,
}

impl OperationSpec {
    pub fn new(method: HttpMethod, path: impl Into<String>, operation_id: impl Into<String>) -> Self {
        OperationSpec {
            method,
            path: path.into(),
            operation_id: operation_id.into(),
            summary: None,
            description: None,
            tags: Vec::new(),
            params: Vec::new(),
            request_body: None,
            responses: Vec::new(),
            schemas: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>, operation_id: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path, operation_id)
    }

    pub fn post(path: impl Into<String>, operation_id: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path, operation_id)
    }

    pub fn patch(path: impl Into<String>, operation_id: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path, operation_id)
    }

    pub fn delete(path: impl Into<String>, operation_id: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path, operation_id)
    }

    pub fn summary(mut self, text: impl Into<String>) -> Self {
        self.summary = Some(text.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Required integer path parameter.
    pub fn integer_path_param(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            description: Some(description.into()),
            param_type: "integer",
        });
        self
    }

    pub fn json_request<T: ToSchema>(mut self, description: impl Into<String>) -> Self {
        let name = self.ensure_schema::<T>();
        self.request_body = Some(RequestBodySpec {
            description: Some(description.into()),
            schema: BodySchema::Component(name),
            required: true,
        });
        self
    }

    pub fn json_response<T: ToSchema>(mut self, status: u16, description: impl Into<String>) -> Self {
        let name = self.ensure_schema::<T>();
        self.push_response(status, description, Some(BodySchema::Component(name)));
        self
    }

    pub fn json_array_response<T: ToSchema>(mut self, status: u16, description: impl Into<String>) -> Self {
        let name = self.ensure_schema::<T>();
        self.push_response(status, description, Some(BodySchema::ArrayOf(name)));
        self
    }

    pub fn empty_response(mut self, status: u16, description: impl Into<String>) -> Self {
        self.push_response(status, description, None);
        self
    }

    fn push_response(&mut self, status: u16, description: impl Into<String>, schema: Option<BodySchema>) {
        self.responses.push(ResponseSpec {
            status,
            description: description.into(),
            schema,
        });
    }

    /// Record `T` and everything it references; returns its component name.
    fn ensure_schema<T: ToSchema>(&mut self) -> String {
        let name = T::name().to_string();
        if !self.schemas.iter().any(|(n, _)| *n == name) {
            self.schemas.push((name.clone(), <T as PartialSchema>::schema()));
            T::schemas(&mut self.schemas);
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;
    use crate::response::ValidationErrorBody;

    #[test]
    fn collects_nested_schemas_once() {
        let op = OperationSpec::get("/users/{id}", "getUser")
            .json_response::<User>(200, "user")
            .json_response::<ValidationErrorBody>(422, "invalid")
            .json_response::<ValidationErrorBody>(400, "again");
        let names: Vec<_> = op.schemas.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&"User"));
        assert!(names.contains(&"ValidationErrorBody"));
        assert!(names.contains(&"ValidationError"));
        assert!(names.contains(&"Issue"));
        assert_eq!(names.iter().filter(|n| **n == "ValidationErrorBody").count(), 1);
    }

    #[test]
    fn debug_output_names_collected_schemas() {
        let op = OperationSpec::post("/users", "createUser").json_response::<User>(200, "user");
        let rendered = format!("{:?}", op);
        assert!(rendered.contains("createUser"));
        assert!(rendered.contains("\"User\""));
    }

    #[test]
    fn body_schema_json() {
        assert_eq!(
            BodySchema::ArrayOf("User".into()).to_json(),
            json!({ "type": "array", "items": { "$ref": "#/components/schemas/User" } })
        );
        assert_eq!(
            BodySchema::Component("User".into()).to_json(),
            json!({ "$ref": "#/components/schemas/User" })
        );
    }
}
