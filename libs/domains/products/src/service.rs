//! Product Service - business logic layer between handlers and repository.

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::query::{OrderBy, Page};
use crate::repository::ProductRepository;

/// Product service providing business logic operations.
///
/// The service validates input, enforces the fetch-before-mutate rule
/// for updates, and delegates persistence to the repository.
#[derive(Clone)]
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
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

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

    /// List one page of products matching the filter
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        filter: ProductFilter,
        order: OrderBy,
        page: Page,
    ) -> ProductResult<Vec<Product>> {
        self.repository.list(filter, order, page).await
    }

    /// Count products matching a filter, independent of pagination
    #[instrument(skip(self))]
    pub async fn count_products(&self, filter: ProductFilter) -> ProductResult<u64> {
        self.repository.count(filter).await
    }

    /// Update an existing product.
    ///
    /// The patch is applied against the entity fetched in this same
    /// call; the repository serializes concurrent mutations to the
    /// same entity.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        // Fetch first so a missing entity is reported before any mutation
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        self.repository.update(id, input).await
    }

    /// Delete a product.
    ///
    /// Reports NotFound for an absent entity; the delete handler maps
    /// that to a no-content response so deletion stays idempotent for
    /// the caller.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if self.repository.get_by_id(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        self.repository.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn valid_input() -> CreateProduct {
        CreateProduct {
            name: "Comic Books".to_string(),
            cost: 2500,
            quantity: 10,
            user_id: Uuid::new_v4(),
        }
    }

    fn stored(id: Uuid) -> Product {
        let mut product = Product::new(valid_input());
        product.id = id;
        product
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_without_core_call() {
        // No expectations set: any repository call would panic
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let input = CreateProduct {
            name: String::new(),
            ..valid_input()
        };
        let result = service.create_product(input).await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn create_delegates_valid_input() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .returning(|input| Ok(Product::new(input)));

        let service = ProductService::new(mock_repo);
        let product = service.create_product(valid_input()).await.unwrap();

        assert_eq!(product.name, "Comic Books");
    }

    #[tokio::test]
    async fn update_fetches_existing_entity_before_applying_patch() {
        let id = Uuid::new_v4();
        let mut mock_repo = MockProductRepository::new();

        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |id| Ok(Some(stored(id))));
        mock_repo
            .expect_update()
            .with(eq(id), mockall::predicate::always())
            .times(1)
            .returning(move |id, input| {
                let mut product = stored(id);
                product.apply_update(input);
                Ok(product)
            });

        let service = ProductService::new(mock_repo);
        let update = UpdateProduct {
            cost: Some(3000),
            ..Default::default()
        };
        let product = service.update_product(id, update).await.unwrap();

        assert_eq!(product.cost, 3000);
    }

    #[tokio::test]
    async fn update_missing_entity_reports_not_found_without_mutation() {
        let id = Uuid::new_v4();
        let mut mock_repo = MockProductRepository::new();

        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));
        // expect_update is never registered: a call would panic

        let service = ProductService::new(mock_repo);
        let result = service.update_product(id, UpdateProduct::default()).await;

        assert!(matches!(result, Err(ProductError::NotFound(got)) if got == id));
    }

    #[tokio::test]
    async fn delete_missing_entity_reports_not_found() {
        let id = Uuid::new_v4();
        let mut mock_repo = MockProductRepository::new();

        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.delete_product(id).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn repository_failures_propagate_unchanged() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_count()
            .returning(|_| Err(ProductError::Internal("storage offline".to_string())));

        let service = ProductService::new(mock_repo);
        let result = service.count_products(ProductFilter::default()).await;

        assert!(matches!(result, Err(ProductError::Internal(_))));
    }
}
