//! Request extractors that validate before a handler runs.

pub mod user_id;
pub mod valid_json;

pub use user_id::{UserId, ID_PARAM};
pub use valid_json::ValidJson;
