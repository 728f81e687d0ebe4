//! Query-string parsing for the product list endpoint.
//!
//! Pagination, filtering, and ordering arrive as loose query
//! parameters. Everything is validated here, before any core call:
//! `page` and `rows` must be integers >= 1, filter keys must be
//! recognized, and the `orderby` field must belong to the sortable
//! allow-list. Any violation is a field-named request error.

use std::collections::HashMap;
use std::str::FromStr;

use strum::{Display, EnumString};
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::ProductFilter;

/// Reserved parameter names, never interpreted as filter keys.
pub const PARAM_PAGE: &str = "page";
pub const PARAM_ROWS: &str = "rows";
pub const PARAM_ORDER_BY: &str = "orderby";

/// Sortable product fields. This enum is the allow-list: a field that
/// does not parse here cannot be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum OrderField {
    ProductId,
    Name,
    Cost,
    Quantity,
    UserId,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// A validated field-plus-direction pair controlling result sequencing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: OrderField,
    pub direction: Direction,
}

/// Current page number and page size, both >= 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub rows: u32,
}

impl Page {
    /// Zero-based offset of the first row on this page.
    pub fn offset(&self) -> usize {
        (self.number as usize - 1) * self.rows as usize
    }
}

/// Defaults for the list endpoint.
///
/// Kept as an explicit value passed into the parse functions rather
/// than literals inside the handlers, so it is independently testable.
#[derive(Debug, Clone, Copy)]
pub struct QueryConfig {
    pub default_page: u32,
    pub default_rows: u32,
    pub default_order: OrderBy,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_rows: 10,
            default_order: OrderBy {
                field: OrderField::ProductId,
                direction: Direction::Asc,
            },
        }
    }
}

fn parse_positive(params: &HashMap<String, String>, param: &str, default: u32) -> ProductResult<u32> {
    let Some(raw) = params.get(param) else {
        return Ok(default);
    };
    let value: u32 = raw.parse().map_err(|_| ProductError::InvalidParam {
        param: param.to_string(),
        reason: "must be an integer >= 1".to_string(),
    })?;
    if value < 1 {
        return Err(ProductError::InvalidParam {
            param: param.to_string(),
            reason: "must be an integer >= 1".to_string(),
        });
    }
    Ok(value)
}

/// Parse `page` and `rows`, applying the configured defaults.
pub fn parse_page(params: &HashMap<String, String>, config: &QueryConfig) -> ProductResult<Page> {
    Ok(Page {
        number: parse_positive(params, PARAM_PAGE, config.default_page)?,
        rows: parse_positive(params, PARAM_ROWS, config.default_rows)?,
    })
}

/// Parse the dynamic filter set.
///
/// Every non-reserved key must be a recognized filter key with a
/// well-formed value; anything else is a request error naming the key.
pub fn parse_filter(params: &HashMap<String, String>) -> ProductResult<ProductFilter> {
    let mut filter = ProductFilter::default();

    for (key, value) in params {
        match key.as_str() {
            PARAM_PAGE | PARAM_ROWS | PARAM_ORDER_BY => {}
            "product_id" => {
                filter.product_id =
                    Some(Uuid::parse_str(value).map_err(|e| ProductError::InvalidParam {
                        param: key.clone(),
                        reason: e.to_string(),
                    })?);
            }
            "user_id" => {
                filter.user_id =
                    Some(Uuid::parse_str(value).map_err(|e| ProductError::InvalidParam {
                        param: key.clone(),
                        reason: e.to_string(),
                    })?);
            }
            "name" => {
                filter.name = Some(value.clone());
            }
            "cost" => {
                filter.cost = Some(value.parse().map_err(|_| ProductError::InvalidParam {
                    param: key.clone(),
                    reason: "must be an integer".to_string(),
                })?);
            }
            "quantity" => {
                filter.quantity = Some(value.parse().map_err(|_| ProductError::InvalidParam {
                    param: key.clone(),
                    reason: "must be an integer".to_string(),
                })?);
            }
            _ => {
                return Err(ProductError::InvalidParam {
                    param: key.clone(),
                    reason: "unrecognized filter key".to_string(),
                });
            }
        }
    }

    Ok(filter)
}

/// Parse the `orderby` specification (`field` or `field,direction`)
/// against the allow-list, falling back to the configured default.
pub fn parse_order(params: &HashMap<String, String>, config: &QueryConfig) -> ProductResult<OrderBy> {
    let Some(raw) = params.get(PARAM_ORDER_BY) else {
        return Ok(config.default_order);
    };

    let (field_str, direction_str) = match raw.split_once(',') {
        Some((field, direction)) => (field.trim(), Some(direction.trim())),
        None => (raw.trim(), None),
    };

    let field = OrderField::from_str(field_str).map_err(|_| ProductError::InvalidParam {
        param: PARAM_ORDER_BY.to_string(),
        reason: format!("field '{}' is not sortable", field_str),
    })?;

    let direction = match direction_str {
        Some(dir) => Direction::from_str(dir).map_err(|_| ProductError::InvalidParam {
            param: PARAM_ORDER_BY.to_string(),
            reason: format!("direction '{}' must be 'asc' or 'desc'", dir),
        })?,
        None => Direction::default(),
    };

    Ok(OrderBy { field, direction })
}
