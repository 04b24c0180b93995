//! Operation registry and the OpenAPI document generated from it.

pub mod document;
pub mod operation;
pub mod registry;

pub use document::{ApiInfo, OpenApiDoc, OPENAPI_VERSION};
pub use operation::{HttpMethod, OperationSpec};
pub use registry::ApiRegistry;
