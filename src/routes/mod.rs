//! Route tables. Documented operations go through `ApiRegistry`.

pub mod common;
pub mod users;
