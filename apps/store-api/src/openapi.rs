//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store API",
        version = "0.1.0",
        description = "MongoDB-based REST API for managing products and todos",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc),
        (path = "/api/todos", api = domain_todos::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product management endpoints (MongoDB)"),
        (name = "Todos", description = "Todo management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
