use async_trait::async_trait;
use database::mongodb::TextFilter;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// This trait defines the data access interface for products.
/// Implementations can use different storage backends (MongoDB, etc.)
///
/// Absent records are signalled with `Ok(None)`, never with an error;
/// translating absence into a failure is the service layer's call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product and return it with its assigned identity
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Fetch up to `limit` matching products starting at `skip`
    async fn list(&self, filter: TextFilter, skip: u64, limit: i64) -> ProductResult<Vec<Product>>;

    /// Count all products matching the filter, ignoring the window
    async fn count(&self, filter: TextFilter) -> ProductResult<u64>;

    /// Merge the provided fields onto the record and return the
    /// post-update state
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// Delete a product and return its last state
    async fn delete(&self, id: Uuid) -> ProductResult<Option<Product>>;
}
