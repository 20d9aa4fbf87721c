use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    DatabaseConnection, EntityTrait, QueryOrder,
};

use super::{DaoResult, NewTodo, TodoId, TodoRepository, next_updated_at};
use crate::db::entities::{prelude::Todo, todo};

/// sea-orm backed [`TodoRepository`].
#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl TodoDao {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }
}

#[async_trait]
impl TodoRepository for TodoDao {
    async fn find_all(&self) -> DaoResult<Vec<todo::Model>> {
        let todos = Todo::find()
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await?;
        Ok(todos)
    }

    async fn find_by_id(&self, id: TodoId) -> DaoResult<Option<todo::Model>> {
        Ok(Todo::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, input: NewTodo) -> DaoResult<todo::Model> {
        let now = Utc::now().fixed_offset();
        let model = todo::ActiveModel {
            id: NotSet,
            title: Set(input.title),
            completed: Set(input.completed),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn update(&self, todo: todo::Model) -> DaoResult<todo::Model> {
        let model = todo::ActiveModel {
            id: Unchanged(todo.id),
            title: Set(todo.title),
            completed: Set(todo.completed),
            created_at: NotSet,
            updated_at: Set(next_updated_at(todo.updated_at)),
        };
        Ok(model.update(&self.db).await?)
    }

    async fn delete(&self, id: TodoId) -> DaoResult<()> {
        Todo::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
