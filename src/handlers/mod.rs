//! HTTP handlers for the users resource and service endpoints.

pub mod common;
pub mod users;
