//! Catalog API service binary.
//!
//! Wires the product handler group to an in-memory repository, mounts
//! it under `/v1/products`, and serves it with graceful shutdown. The
//! OpenAPI document is available at `/api-docs/openapi.json`.

use axum::{Json, Router, routing::get};
use axum_helpers::shutdown_signal;
use domain_products::{ApiDoc, InMemoryProductRepository, ProductService, handlers};
use tracing::info;
use tracing_subscriber::{EnvFilter, prelude::*};
use utoipa::OpenApi;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let repository = InMemoryProductRepository::new();
    let service = ProductService::new(repository);

    let app = Router::new()
        .nest("/v1/products", handlers::router(service))
        .route("/api-docs/openapi.json", get(openapi_json));

    let addr =
        std::env::var("CATALOG_API_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("catalog-api listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
