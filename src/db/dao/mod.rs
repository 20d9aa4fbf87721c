pub mod error;
pub mod memory;
pub mod repository;
pub mod todo_dao;

pub use error::{DaoLayerError, DaoResult};
pub use memory::InMemoryTodoDao;
pub use repository::{NewTodo, TodoId, TodoRepository, next_updated_at};
pub use todo_dao::TodoDao;
