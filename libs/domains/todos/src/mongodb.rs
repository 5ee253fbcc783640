//! MongoDB implementation of TodoRepository

use async_trait::async_trait;
use database::mongodb::TextFilter;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, doc, to_bson},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::TodoResult;
use crate::models::{CreateTodo, Todo, UpdateTodo};
use crate::repository::TodoRepository;

/// MongoDB implementation of the TodoRepository
pub struct MongoTodoRepository {
    collection: Collection<Todo>,
}

impl MongoTodoRepository {
    /// Create a new MongoTodoRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Todo>("todos");
        Self { collection }
    }

    /// Create a new MongoTodoRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Todo>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for optimal query performance
    pub async fn init_indexes(&self) -> TodoResult<()> {
        let indexes = vec![
            // Title lookups and substring scans
            IndexModel::builder()
                .keys(doc! { "title": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_title".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Todo indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Todo> {
        &self.collection
    }

    fn id_filter(id: Uuid) -> mongodb::bson::Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }
}

#[async_trait]
impl TodoRepository for MongoTodoRepository {
    #[instrument(skip(self, input), fields(todo_title = %input.title))]
    async fn create(&self, input: CreateTodo) -> TodoResult<Todo> {
        let todo = Todo::new(input);

        self.collection.insert_one(&todo).await?;

        tracing::info!(todo_id = %todo.id, "Todo created successfully");
        Ok(todo)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> TodoResult<Option<Todo>> {
        let todo = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(todo)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: TextFilter, offset: u64, limit: i64) -> TodoResult<Vec<Todo>> {
        use futures_util::TryStreamExt;

        let options = mongodb::options::FindOptions::builder()
            .skip(offset)
            .limit(limit)
            // UUID v7 ids are time-ordered, so this keeps windows stable
            .sort(doc! { "_id": 1 })
            .build();

        let cursor = self
            .collection
            .find(filter.to_document())
            .with_options(options)
            .await?;
        let todos: Vec<Todo> = cursor.try_collect().await?;

        Ok(todos)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: TextFilter) -> TodoResult<u64> {
        let count = self.collection.count_documents(filter.to_document()).await?;
        Ok(count)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateTodo) -> TodoResult<Option<Todo>> {
        let set = input.into_set_document();
        if set.is_empty() {
            // The driver rejects an empty $set; nothing to merge anyway
            return self.get_by_id(id).await;
        }

        let updated = self
            .collection
            .find_one_and_update(Self::id_filter(id), doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(todo_id = %id, "Todo updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> TodoResult<Option<Todo>> {
        let deleted = self
            .collection
            .find_one_and_delete(Self::id_filter(id))
            .await?;

        if deleted.is_some() {
            tracing::info!(todo_id = %id, "Todo deleted successfully");
        }
        Ok(deleted)
    }
}
