//! Users API: a small REST service for managing user records in SQLite,
//! with request validation and a generated OpenAPI document.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod validation;

pub use app::{api_registry, create_app};
pub use config::{AppConfig, Environment};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{NewUser, User, UserPatch};
pub use state::AppState;
pub use store::UserStore;
pub use telemetry::init_tracing;
pub use validation::{Issue, ValidationError};
