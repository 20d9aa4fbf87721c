use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::DaoResult;
use crate::db::entities::todo;

pub type TodoId = i32;

/// Fields a caller supplies when creating a record. Id and timestamps are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
}

/// Storage port for todo records.
///
/// `find_by_id` reports absence as `Ok(None)`, and `delete` of an unknown id
/// succeeds silently. Existence checks belong to the caller.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All records, ascending by id.
    async fn find_all(&self) -> DaoResult<Vec<todo::Model>>;

    async fn find_by_id(&self, id: TodoId) -> DaoResult<Option<todo::Model>>;

    /// Persists a new record and returns it with id and timestamps assigned.
    async fn create(&self, todo: NewTodo) -> DaoResult<todo::Model>;

    /// Overwrites `title` and `completed` of the record with `todo.id` and
    /// refreshes `updated_at`.
    async fn update(&self, todo: todo::Model) -> DaoResult<todo::Model>;

    async fn delete(&self, id: TodoId) -> DaoResult<()>;
}

/// Timestamp for an update of a record last touched at `previous`; never
/// earlier than `previous`, even if the wall clock stepped back.
pub fn next_updated_at(previous: DateTimeWithTimeZone) -> DateTimeWithTimeZone {
    Utc::now().fixed_offset().max(previous)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::next_updated_at;

    #[test]
    fn updated_at_never_moves_backwards() {
        let future = Utc::now().fixed_offset() + Duration::hours(1);
        assert_eq!(next_updated_at(future), future);

        let past = Utc::now().fixed_offset() - Duration::hours(1);
        assert!(next_updated_at(past) > past);
    }
}
