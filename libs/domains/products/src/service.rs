//! Product Service - Business logic layer

use database::mongodb::TextFilter;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductPage, ProductQuery, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The service layer builds filter specifications and pagination
/// windows and orchestrates repository operations. It performs no field
/// validation: product payloads are accepted as-is.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List one page of products, with the total match count
    ///
    /// The page fetch and the count run concurrently against the same
    /// filter. They are two independent reads, so a concurrent writer
    /// can make `total` disagree with the returned page; pagination
    /// here is best-effort, not transactional.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> ProductResult<ProductPage> {
        // Non-positive paging parameters are clamped rather than
        // rejected, so the store never sees a negative window.
        let page = query.page.max(1);
        let limit = query.limit.max(1);
        let skip = ((page - 1) * limit) as u64;

        let filter = TextFilter::substring("name", query.search);

        let (data, total) = tokio::try_join!(
            self.repository.list(filter.clone(), skip, limit),
            self.repository.count(filter),
        )?;

        Ok(ProductPage {
            data,
            total,
            page,
            limit,
        })
    }

    /// Merge the provided fields onto an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Delete a product, returning its last state
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .delete(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
