//! Request validation: one field rule set shared by the create and update contracts,
//! producing structured, field-scoped issues.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;
use utoipa::ToSchema;

pub const VALIDATION_ERROR_NAME: &str = "ValidationError";

pub mod codes {
    pub const INVALID_TYPE: &str = "invalid_type";
    pub const INVALID_FORMAT: &str = "invalid_format";
    pub const TOO_SMALL: &str = "too_small";
    pub const INVALID_UPDATES: &str = "invalid_updates";
}

pub mod messages {
    pub const INVALID_EMAIL: &str = "Invalid email address";
    pub const TOO_SMALL_STRING: &str = "Too small: expected string to have >=1 characters";
    pub const EXPECTED_NUMBER: &str = "Invalid input: expected number, received NaN";
    pub const NO_UPDATES: &str = "No updates provided";
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap_or_else(|e| panic!("email pattern must compile: {}", e))
});

/// One element of an issue path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(s: &str) -> Self {
        PathSegment::Key(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Issue {
    pub code: String,
    pub path: Vec<PathSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Issue {
    pub fn new(code: &str, path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Issue {
            code: code.to_string(),
            path,
            message: Some(message.into()),
        }
    }

    pub fn at_field(code: &str, field: &str, message: impl Into<String>) -> Self {
        Issue::new(code, vec![PathSegment::from(field)], message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, ToSchema)]
#[error("{name}: {} issue(s)", .issues.len())]
#[schema(example = json!({
    "name": "ValidationError",
    "issues": [{
        "code": "invalid_type",
        "path": ["email"],
        "message": "Invalid input: expected string, received undefined"
    }]
}))]
pub struct ValidationError {
    pub name: String,
    pub issues: Vec<Issue>,
}

impl ValidationError {
    pub fn new(issues: Vec<Issue>) -> Self {
        ValidationError {
            name: VALIDATION_ERROR_NAME.to_string(),
            issues,
        }
    }

    pub fn single(issue: Issue) -> Self {
        ValidationError::new(vec![issue])
    }

    /// Update request that names none of the updatable fields.
    pub fn no_updates() -> Self {
        ValidationError::single(Issue::new(codes::INVALID_UPDATES, Vec::new(), messages::NO_UPDATES))
    }

    /// Path parameter that does not parse as an integer identifier.
    pub fn invalid_id(param: &str) -> Self {
        ValidationError::single(Issue::at_field(codes::INVALID_TYPE, param, messages::EXPECTED_NUMBER))
    }
}

/// A request contract that can be built from an untyped JSON body.
pub trait Validate: Sized {
    fn validate(body: &Value) -> Result<Self, ValidationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Email,
    NonEmpty,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rule: FieldRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Business fields of a user, in the order issues are reported.
pub const USER_FIELDS: [FieldSpec; 3] = [
    FieldSpec { name: "email", rule: FieldRule::Email },
    FieldSpec { name: "firstName", rule: FieldRule::NonEmpty },
    FieldSpec { name: "lastName", rule: FieldRule::NonEmpty },
];

/// Checks `body` against `fields`. Keys not named in `fields` are ignored.
/// Returns the accepted string values of the fields that were present.
pub fn validate_fields(
    body: &Value,
    fields: &[FieldSpec],
    presence: Presence,
) -> Result<HashMap<&'static str, String>, ValidationError> {
    let obj = as_object(body)?;
    let mut issues = Vec::new();
    let mut values = HashMap::new();
    for spec in fields {
        match obj.get(spec.name) {
            None => {
                if presence == Presence::Required {
                    issues.push(Issue::at_field(codes::INVALID_TYPE, spec.name, expected("string", "undefined")));
                }
            }
            Some(Value::String(s)) => match check_rule(spec, s) {
                Some(issue) => issues.push(issue),
                None => {
                    values.insert(spec.name, s.clone());
                }
            },
            Some(other) => {
                issues.push(Issue::at_field(codes::INVALID_TYPE, spec.name, expected("string", json_type(other))));
            }
        }
    }
    if issues.is_empty() {
        Ok(values)
    } else {
        Err(ValidationError::new(issues))
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object().ok_or_else(|| {
        ValidationError::single(Issue::new(codes::INVALID_TYPE, Vec::new(), expected("object", json_type(body))))
    })
}

fn check_rule(spec: &FieldSpec, s: &str) -> Option<Issue> {
    match spec.rule {
        FieldRule::Email if !is_valid_email(s) => {
            Some(Issue::at_field(codes::INVALID_FORMAT, spec.name, messages::INVALID_EMAIL))
        }
        FieldRule::NonEmpty if s.is_empty() => {
            Some(Issue::at_field(codes::TOO_SMALL, spec.name, messages::TOO_SMALL_STRING))
        }
        _ => None,
    }
}

pub fn is_valid_email(s: &str) -> bool {
    !s.starts_with('.') && !s.contains("..") && EMAIL_RE.is_match(s)
}

fn expected(want: &str, got: &str) -> String {
    format!("Invalid input: expected {}, received {}", want, got)
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
