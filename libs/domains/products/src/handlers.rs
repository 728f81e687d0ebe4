//! HTTP handlers for the Products API

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestParameterResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, ProductPage, ProductResponse, UpdateProduct};
use crate::query::{self, QueryConfig};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(CreateProduct, UpdateProduct, ProductResponse, ProductPage),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestParameterResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products with paging, filtering, and ordering
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(
        ("page" = Option<u32>, Query, description = "Page number, >= 1 (default 1)"),
        ("rows" = Option<u32>, Query, description = "Rows per page, >= 1 (default 10)"),
        ("orderby" = Option<String>, Query, description = "Sort specification: field[,asc|desc]. Sortable fields: product_id, name, cost, quantity, user_id"),
        ("product_id" = Option<Uuid>, Query, description = "Filter by product ID"),
        ("user_id" = Option<Uuid>, Query, description = "Filter by owner"),
        ("name" = Option<String>, Query, description = "Filter by name substring"),
        ("cost" = Option<i64>, Query, description = "Filter by exact cost in cents"),
        ("quantity" = Option<i32>, Query, description = "Filter by exact quantity"),
    ),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(params): Query<HashMap<String, String>>,
) -> ProductResult<Json<ProductPage>> {
    let config = QueryConfig::default();

    // Every parameter is validated before the first core call
    let page = query::parse_page(&params, &config)?;
    let filter = query::parse_filter(&params)?;
    let order = query::parse_order(&params, &config)?;

    let products = service
        .list_products(filter.clone(), order, page)
        .await?;
    let items: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

    // Total uses the identical filter, unconstrained by pagination
    let total = service.count_products(filter).await?;

    Ok(Json(ProductPage {
        items,
        total,
        page: page.number,
        rows_per_page: page.rows,
    }))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.get_product(id).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// Delete a product.
///
/// Deleting an identifier that no longer exists is already satisfied
/// from the caller's perspective, so an absent entity yields 204
/// rather than 404.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted (or already absent)"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<StatusCode> {
    match service.delete_product(id).await {
        Ok(()) | Err(ProductError::NotFound(_)) => Ok(StatusCode::NO_CONTENT),
        Err(err) => Err(err),
    }
}
