use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    db::dao::{InMemoryTodoDao, TodoDao, TodoRepository},
    services::todo_service::TodoService,
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    todos: Arc<dyn TodoRepository>,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self::with_repository(Arc::new(TodoDao::new(db)))
    }

    pub fn with_repository(todos: Arc<dyn TodoRepository>) -> Self {
        Self { todos }
    }

    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryTodoDao::new()))
    }

    pub fn from_state(state: &AppState) -> Self {
        state.services.clone()
    }

    pub fn todo(&self) -> TodoService {
        TodoService::new(Arc::clone(&self.todos))
    }
}
