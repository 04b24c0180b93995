//! Cross-cutting HTTP middleware.

pub mod errors;
pub mod request_id;

pub use errors::{handle_panic, not_found, render_errors};
pub use request_id::{trace_layer, MakeRequestUuid, REQUEST_ID_HEADER};
