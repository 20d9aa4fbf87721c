use std::sync::Arc;

use axum::{Router, middleware};

use crate::{
    middleware::{catch_panic_layer, cors_layer, json_error_middleware, trace_layer},
    state::AppState,
};

use super::todo;

/// Bare routes without the middleware stack.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new().merge(todo::router(state))
}

/// Routes wrapped in JSON error normalisation, panic recovery, CORS and
/// request tracing, outermost last.
pub fn app(state: Arc<AppState>) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.config.cors)?;
    Ok(router(state)
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(cors)
        .layer(trace_layer()))
}
