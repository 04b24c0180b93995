//! Response bodies shared by handlers, middleware and the API document.

use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const NOT_FOUND_MESSAGE: &str = "Not Found";
pub const HEALTH_MESSAGE: &str = "API is up and running";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "message": "Not Found" }))]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        MessageBody {
            message: message.into(),
        }
    }
}

/// Body of an unclassified failure. `stack` is omitted in production.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Envelope for 422 responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    #[schema(example = false)]
    pub success: bool,
    pub error: ValidationError,
}

impl From<ValidationError> for ValidationErrorBody {
    fn from(error: ValidationError) -> Self {
        ValidationErrorBody { success: false, error }
    }
}
