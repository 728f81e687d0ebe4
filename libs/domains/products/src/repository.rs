use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::query::{Direction, OrderBy, OrderField, Page};

/// Repository trait for Product persistence.
///
/// This is the boundary to the business core: implementations own
/// storage and the serialization of concurrent mutations to a given
/// entity. The handler layer treats every call as a single unit of
/// work and adds no locking of its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List one page of products matching the filter, in the requested order
    async fn list(
        &self,
        filter: ProductFilter,
        order: OrderBy,
        page: Page,
    ) -> ProductResult<Vec<Product>>;

    /// Update an existing product
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID, reporting whether it existed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Count products matching a filter, independent of pagination
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn compare(a: &Product, b: &Product, order: OrderBy) -> std::cmp::Ordering {
    let ordering = match order.field {
        OrderField::ProductId => a.id.cmp(&b.id),
        OrderField::Name => a.name.cmp(&b.name),
        OrderField::Cost => a.cost.cmp(&b.cost),
        OrderField::Quantity => a.quantity.cmp(&b.quantity),
        OrderField::UserId => a.user_id.cmp(&b.user_id),
    };
    match order.direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = Product::new(input);
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: ProductFilter,
        order: OrderBy,
        page: Page,
    ) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        result.sort_by(|a, b| compare(a, b, order));

        let result: Vec<Product> = result
            .into_iter()
            .skip(page.offset())
            .take(page.rows as usize)
            .collect();

        Ok(result)
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        let products = self.products.read().await;
        Ok(products.values().filter(|p| filter.matches(p)).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryConfig;

    fn input(name: &str, cost: i64, quantity: i32, user_id: Uuid) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            cost,
            quantity,
            user_id,
        }
    }

    fn default_order() -> OrderBy {
        QueryConfig::default().default_order
    }

    #[tokio::test]
    async fn create_and_get_product() {
        let repo = InMemoryProductRepository::new();

        let product = repo
            .create(input("Comic Books", 2500, 10, Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!(product.name, "Comic Books");

        let fetched = repo.get_by_id(product.id).await.unwrap();
        assert_eq!(fetched, Some(product));
    }

    #[tokio::test]
    async fn delete_reports_whether_entity_existed() {
        let repo = InMemoryProductRepository::new();
        let product = repo
            .create(input("Comic Books", 2500, 10, Uuid::new_v4()))
            .await
            .unwrap();

        assert!(repo.delete(product.id).await.unwrap());
        assert!(!repo.delete(product.id).await.unwrap());
        assert_eq!(repo.get_by_id(product.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_applies_filter_order_and_pagination() {
        let repo = InMemoryProductRepository::new();
        let user_id = Uuid::new_v4();

        for (name, cost) in [("beta", 300), ("alpha", 100), ("gamma", 200)] {
            repo.create(input(name, cost, 1, user_id)).await.unwrap();
        }
        repo.create(input("other", 999, 1, Uuid::new_v4()))
            .await
            .unwrap();

        let filter = ProductFilter {
            user_id: Some(user_id),
            ..Default::default()
        };
        let order = OrderBy {
            field: OrderField::Cost,
            direction: Direction::Desc,
        };

        let page = repo
            .list(filter.clone(), order, Page { number: 1, rows: 2 })
            .await
            .unwrap();
        assert_eq!(
            page.iter().map(|p| p.cost).collect::<Vec<_>>(),
            vec![300, 200]
        );

        let page = repo
            .list(filter.clone(), order, Page { number: 2, rows: 2 })
            .await
            .unwrap();
        assert_eq!(page.iter().map(|p| p.cost).collect::<Vec<_>>(), vec![100]);

        // count ignores pagination bounds
        assert_eq!(repo.count(filter).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn update_missing_product_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let result = repo.update(Uuid::new_v4(), UpdateProduct::default()).await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_orders_by_name() {
        let repo = InMemoryProductRepository::new();
        let user_id = Uuid::new_v4();
        for name in ["pencil", "apple", "marble"] {
            repo.create(input(name, 100, 1, user_id)).await.unwrap();
        }

        let result = repo
            .list(
                ProductFilter::default(),
                OrderBy {
                    field: OrderField::Name,
                    direction: Direction::Asc,
                },
                Page { number: 1, rows: 10 },
            )
            .await
            .unwrap();
        let names: Vec<_> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["apple", "marble", "pencil"]);

        // default ordering is by product id ascending
        let by_id = repo
            .list(
                ProductFilter::default(),
                default_order(),
                Page { number: 1, rows: 10 },
            )
            .await
            .unwrap();
        let returned: Vec<_> = by_id.iter().map(|p| p.id).collect();
        let mut sorted = returned.clone();
        sorted.sort();
        assert_eq!(returned.len(), 3);
        assert_eq!(returned, sorted);
    }
}
