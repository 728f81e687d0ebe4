//! Product entity, wire-level DTOs, and the translations between them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product entity - the domain representation owned by the business core.
///
/// The handler layer never mutates this directly; it reads fields to
/// build wire DTOs and passes caller-supplied values into core calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier, assigned on creation
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Price in cents (for precision)
    pub cost: i64,
    /// Units in stock
    pub quantity: i32,
    /// Owner of the product
    pub user_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Price in cents
    #[validate(range(min = 0))]
    pub cost: i64,
    #[validate(range(min = 1))]
    pub quantity: i32,
    /// Owner of the product
    pub user_id: Uuid,
}

/// DTO for a partial update; absent fields leave the entity unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub cost: Option<i64>,
    #[validate(range(min = 1))]
    pub quantity: Option<i32>,
}

/// Wire-level projection of a [`Product`], derived fresh per response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub cost: i64,
    pub quantity: i32,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            cost: product.cost,
            quantity: product.quantity,
            user_id: product.user_id,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// One page of query results plus the total count matching the filter
/// independent of pagination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<ProductResponse>,
    pub total: u64,
    pub page: u32,
    pub rows_per_page: u32,
}

/// Query filter for listing products.
///
/// An absent field means "no constraint on that field". The list and
/// count core calls always receive the same filter value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub product_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    /// Case-insensitive substring match on the name
    pub name: Option<String>,
    pub cost: Option<i64>,
    pub quantity: Option<i32>,
}

impl ProductFilter {
    /// Whether a product satisfies every constraint in the filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(id) = self.product_id {
            if product.id != id {
                return false;
            }
        }
        if let Some(user_id) = self.user_id {
            if product.user_id != user_id {
                return false;
            }
        }
        if let Some(ref name) = self.name {
            if !product.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(cost) = self.cost {
            if product.cost != cost {
                return false;
            }
        }
        if let Some(quantity) = self.quantity {
            if product.quantity != quantity {
                return false;
            }
        }
        true
    }
}

impl Product {
    /// Create a new product from a [`CreateProduct`] DTO.
    ///
    /// The identifier and timestamps are server-assigned.
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            cost: input.cost,
            quantity: input.quantity,
            user_id: input.user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update from an [`UpdateProduct`] DTO.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(cost) = update.cost {
            self.cost = cost;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product::new(CreateProduct {
            name: "Comic Books".to_string(),
            cost: 2500,
            quantity: 10,
            user_id: Uuid::new_v4(),
        })
    }

    #[test]
    fn new_product_carries_input_fields() {
        let user_id = Uuid::new_v4();
        let product = Product::new(CreateProduct {
            name: "Comic Books".to_string(),
            cost: 2500,
            quantity: 10,
            user_id,
        });

        assert_eq!(product.name, "Comic Books");
        assert_eq!(product.cost, 2500);
        assert_eq!(product.quantity, 10);
        assert_eq!(product.user_id, user_id);
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn apply_update_leaves_absent_fields_unchanged() {
        let mut product = sample_product();
        let original_cost = product.cost;
        let original_user = product.user_id;

        product.apply_update(UpdateProduct {
            name: Some("Graphic Novels".to_string()),
            cost: None,
            quantity: None,
        });

        assert_eq!(product.name, "Graphic Novels");
        assert_eq!(product.cost, original_cost);
        assert_eq!(product.user_id, original_user);
        assert!(product.updated_at >= product.created_at);
    }

    #[test]
    fn response_projection_mirrors_domain_fields() {
        let product = sample_product();
        let response = ProductResponse::from(product.clone());

        assert_eq!(response.id, product.id);
        assert_eq!(response.name, product.name);
        assert_eq!(response.cost, product.cost);
        assert_eq!(response.quantity, product.quantity);
        assert_eq!(response.user_id, product.user_id);
    }

    #[test]
    fn filter_name_is_case_insensitive_substring() {
        let product = sample_product();

        let filter = ProductFilter {
            name: Some("comic".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&product));

        let filter = ProductFilter {
            name: Some("gadget".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&product));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(ProductFilter::default().matches(&sample_product()));
    }
}
