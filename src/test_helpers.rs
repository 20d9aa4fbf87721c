use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;

use crate::{
    config::{AppConfig, DatabaseConfig, Environment},
    db::dao::TodoRepository,
    routes::app,
    services::ServiceContext,
    state::AppState,
};

pub fn test_config() -> AppConfig {
    let mut cfg = AppConfig {
        database: Some(DatabaseConfig::new("sqlite::memory:")),
        ..AppConfig::default()
    };
    cfg.general.environment = Environment::Test;
    cfg
}

/// Full middleware stack over the given repository.
pub fn test_app_with(repo: Arc<dyn TodoRepository>) -> Router {
    let state = AppState::new(test_config(), ServiceContext::with_repository(repo));
    app(state).expect("test app should build")
}

/// Full middleware stack over a sea-orm connection (real or mocked).
pub fn test_app_with_db(db: &DatabaseConnection) -> Router {
    let state = AppState::new(test_config(), ServiceContext::new(db));
    app(state).expect("test app should build")
}

pub fn test_app() -> Router {
    let state = AppState::new(test_config(), ServiceContext::in_memory());
    app(state).expect("test app should build")
}
