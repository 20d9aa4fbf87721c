use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::DbErr;
use tokio::sync::RwLock;

use super::{DaoResult, NewTodo, TodoId, TodoRepository, next_updated_at};
use crate::db::entities::todo;

/// In-process [`TodoRepository`] used by tests and local experiments.
///
/// Ids start at 1 and are never reused. Clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemoryTodoDao {
    state: Arc<RwLock<MemoryState>>,
}

struct MemoryState {
    /// `None` once `TodoId::MAX` has been handed out.
    next_id: Option<TodoId>,
    rows: BTreeMap<TodoId, todo::Model>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            next_id: Some(1),
            rows: BTreeMap::new(),
        }
    }
}

impl InMemoryTodoDao {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoDao {
    async fn find_all(&self) -> DaoResult<Vec<todo::Model>> {
        Ok(self.state.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: TodoId) -> DaoResult<Option<todo::Model>> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, input: NewTodo) -> DaoResult<todo::Model> {
        let mut state = self.state.write().await;
        let id = state
            .next_id
            .ok_or_else(|| DbErr::Custom("todo id space exhausted".to_string()))?;
        state.next_id = id.checked_add(1);

        let now = Utc::now().fixed_offset();
        let model = todo::Model {
            id,
            title: input.title,
            completed: input.completed,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(id, model.clone());
        Ok(model)
    }

    async fn update(&self, todo: todo::Model) -> DaoResult<todo::Model> {
        let mut state = self.state.write().await;
        // Same outcome as an UPDATE that matched no row.
        let stored = state
            .rows
            .get_mut(&todo.id)
            .ok_or(DbErr::RecordNotUpdated)?;

        stored.title = todo.title;
        stored.completed = todo.completed;
        stored.updated_at = next_updated_at(stored.updated_at);
        Ok(stored.clone())
    }

    async fn delete(&self, id: TodoId) -> DaoResult<()> {
        self.state.write().await.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryTodoDao;
    use crate::db::dao::{DaoLayerError, NewTodo, TodoId, TodoRepository};

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn assigns_increasing_ids_and_lists_in_order() {
        let dao = InMemoryTodoDao::new();
        for title in ["a", "b", "c"] {
            dao.create(new_todo(title)).await.expect("create");
        }
        dao.delete(2).await.expect("delete");
        let created = dao.create(new_todo("d")).await.expect("create");

        assert_eq!(created.id, 4);
        let ids: Vec<i32> = dao
            .find_all()
            .await
            .expect("list")
            .iter()
            .map(|todo| todo.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_created_at() {
        let dao = InMemoryTodoDao::new();
        let created = dao.create(new_todo("Buy milk")).await.expect("create");

        let mut changed = created.clone();
        changed.title = "Buy milk and eggs".to_string();
        changed.completed = true;
        let updated = dao.update(changed).await.expect("update");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Buy milk and eggs");
        assert!(updated.completed);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_of_missing_row_fails_and_delete_is_silent() {
        let dao = InMemoryTodoDao::new();
        let created = dao.create(new_todo("gone")).await.expect("create");
        dao.delete(created.id).await.expect("delete");
        dao.delete(created.id).await.expect("second delete is a no-op");

        let err = dao.update(created).await.expect_err("update should fail");
        assert!(matches!(err, DaoLayerError::Db(_)));
        assert!(dao.is_empty().await);
    }

    #[tokio::test]
    async fn create_fails_once_ids_run_out() {
        let dao = InMemoryTodoDao::new();
        dao.state.write().await.next_id = Some(TodoId::MAX);

        let last = dao.create(new_todo("last")).await.expect("create");
        assert_eq!(last.id, TodoId::MAX);

        let err = dao
            .create(new_todo("one too many"))
            .await
            .expect_err("create should fail");
        assert!(matches!(err, DaoLayerError::Db(_)));
        assert_eq!(dao.len().await, 1);
    }
}
