mod cors;
mod json_error;
mod panic;
mod trace;

pub use cors::cors_layer;
pub use json_error::json_error_middleware;
pub use panic::catch_panic_layer;
pub use trace::trace_layer;
