//! Todos Domain
//!
//! This module provides a complete domain implementation for managing todos using MongoDB.
//!
//! Unlike the products domain, every HTTP response here is wrapped in a
//! uniform envelope carrying a status code, an optional message, and
//! the payload. Listing uses limit/offset pagination with page-count
//! metadata, and search matches case-insensitive substrings of the
//! title. A missing identity is a hard 404 ("Todo not found"), and
//! updates re-validate the required-field constraints before they are
//! persisted.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_todos::{
//!     handlers,
//!     mongodb::MongoTodoRepository,
//!     service::TodoService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("store");
//!
//! let repository = MongoTodoRepository::new(&db);
//! let service = TodoService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{TodoError, TodoResult};
pub use handlers::ApiDoc;
pub use models::{CreateTodo, Envelope, ListMeta, Todo, TodoPage, TodoQuery, UpdateTodo};
pub use mongodb::MongoTodoRepository;
pub use repository::TodoRepository;
pub use service::TodoService;
