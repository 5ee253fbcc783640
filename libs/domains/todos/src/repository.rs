use async_trait::async_trait;
use database::mongodb::TextFilter;
use uuid::Uuid;

use crate::error::TodoResult;
use crate::models::{CreateTodo, Todo, UpdateTodo};

/// Repository trait for Todo persistence
///
/// This trait defines the data access interface for todos.
/// Implementations can use different storage backends (MongoDB, etc.)
///
/// Absent records are signalled with `Ok(None)`, never with an error;
/// translating absence into a failure is the service layer's call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Insert a new todo and return it with its assigned identity
    async fn create(&self, input: CreateTodo) -> TodoResult<Todo>;

    /// Get a todo by ID
    async fn get_by_id(&self, id: Uuid) -> TodoResult<Option<Todo>>;

    /// Fetch up to `limit` matching todos starting at `offset`
    async fn list(&self, filter: TextFilter, offset: u64, limit: i64) -> TodoResult<Vec<Todo>>;

    /// Count all todos matching the filter, ignoring the window
    async fn count(&self, filter: TextFilter) -> TodoResult<u64>;

    /// Merge the provided fields onto the record and return the
    /// post-update state
    async fn update(&self, id: Uuid, input: UpdateTodo) -> TodoResult<Option<Todo>>;

    /// Delete a todo and return its last state
    async fn delete(&self, id: Uuid) -> TodoResult<Option<Todo>>;
}
