use std::sync::Arc;

use tracing::debug;

use crate::db::{
    dao::{DaoLayerError, NewTodo, TodoId, TodoRepository},
    entities::todo,
};

/// Failures a caller can tell apart by variant.
#[derive(Debug, thiserror::Error)]
pub enum TodoServiceError {
    #[error("invalid input")]
    InvalidInput,
    #[error("todo not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] DaoLayerError),
}

pub type TodoResult<T> = Result<T, TodoServiceError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodoInput {
    pub title: String,
}

/// Whole-record replacement: both fields are always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodoInput {
    pub title: String,
    pub completed: bool,
}

/// Business rules for todo records: title validation and existence checks.
/// Holds no state of its own between calls.
#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_todos(&self) -> TodoResult<Vec<todo::Model>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get_todo(&self, id: u64) -> TodoResult<todo::Model> {
        self.require(id).await
    }

    /// Only the empty string is rejected; whitespace-only titles are stored
    /// as given.
    pub async fn create_todo(&self, input: CreateTodoInput) -> TodoResult<todo::Model> {
        if input.title.is_empty() {
            return Err(TodoServiceError::InvalidInput);
        }

        let created = self
            .repo
            .create(NewTodo {
                title: input.title,
                completed: false,
            })
            .await?;
        debug!(id = created.id, "todo created");
        Ok(created)
    }

    pub async fn update_todo(&self, id: u64, input: UpdateTodoInput) -> TodoResult<todo::Model> {
        if input.title.is_empty() {
            return Err(TodoServiceError::InvalidInput);
        }

        let mut existing = self.require(id).await?;
        existing.title = input.title;
        existing.completed = input.completed;

        let updated = self.repo.update(existing).await?;
        debug!(id = updated.id, "todo updated");
        Ok(updated)
    }

    pub async fn delete_todo(&self, id: u64) -> TodoResult<()> {
        let existing = self.require(id).await?;
        self.repo.delete(existing.id).await?;
        debug!(id = existing.id, "todo deleted");
        Ok(())
    }

    async fn require(&self, id: u64) -> TodoResult<todo::Model> {
        // Ids beyond the key range can never have been assigned.
        let key = TodoId::try_from(id).map_err(|_| TodoServiceError::NotFound)?;
        self.repo
            .find_by_id(key)
            .await?
            .ok_or(TodoServiceError::NotFound)
    }
}
