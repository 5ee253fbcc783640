//! Todo Service - Business logic layer

use database::mongodb::TextFilter;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{TodoError, TodoResult};
use crate::models::{CreateTodo, ListMeta, Todo, TodoPage, TodoQuery, UpdateTodo};
use crate::repository::TodoRepository;

/// Todo service providing business logic operations
///
/// The service layer handles validation, builds filter specifications
/// and pagination windows, and orchestrates repository operations.
pub struct TodoService<R: TodoRepository> {
    repository: Arc<R>,
}

impl<R: TodoRepository> TodoService<R> {
    /// Create a new TodoService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new todo
    #[instrument(skip(self, input), fields(todo_title = %input.title))]
    pub async fn create_todo(&self, input: CreateTodo) -> TodoResult<Todo> {
        input
            .validate()
            .map_err(|e| TodoError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a todo by ID
    #[instrument(skip(self))]
    pub async fn get_todo(&self, id: Uuid) -> TodoResult<Todo> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TodoError::NotFound)
    }

    /// List one window of todos, with pagination metadata
    ///
    /// The window fetch and the count run concurrently against the same
    /// filter. They are two independent reads, so a concurrent writer
    /// can make `meta.total` disagree with the returned window;
    /// pagination here is best-effort, not transactional.
    #[instrument(skip(self))]
    pub async fn list_todos(&self, query: TodoQuery) -> TodoResult<TodoPage> {
        // A non-positive limit is clamped rather than rejected
        let limit = query.limit.max(1);
        let offset = query.offset;

        let filter = TextFilter::substring("title", query.search);

        let (items, total) = tokio::try_join!(
            self.repository.list(filter.clone(), offset, limit),
            self.repository.count(filter),
        )?;

        Ok(TodoPage {
            items,
            meta: ListMeta::new(limit, offset, total),
        })
    }

    /// Merge the provided fields onto an existing todo
    ///
    /// The required-field constraints are re-checked before anything is
    /// persisted.
    #[instrument(skip(self, input))]
    pub async fn update_todo(&self, id: Uuid, input: UpdateTodo) -> TodoResult<Todo> {
        input
            .validate()
            .map_err(|e| TodoError::Validation(e.to_string()))?;

        self.repository
            .update(id, input)
            .await?
            .ok_or(TodoError::NotFound)
    }

    /// Delete a todo, returning its last state
    #[instrument(skip(self))]
    pub async fn delete_todo(&self, id: Uuid) -> TodoResult<Todo> {
        self.repository
            .delete(id)
            .await?
            .ok_or(TodoError::NotFound)
    }
}

impl<R: TodoRepository> Clone for TodoService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
