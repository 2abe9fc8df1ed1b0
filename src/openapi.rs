use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DinePOS API",
        description = "Point-of-sale and inventory ledger service for restaurant operations",
        version = env!("CARGO_PKG_VERSION"),
    ),
    components(schemas(ErrorResponse)),
    tags(
        (name = "catalog", description = "Menu items and ingredients"),
        (name = "directory", description = "Customers, employees, and suppliers"),
        (name = "transactions", description = "Sales, purchase orders, deliveries, and releases"),
        (name = "reports", description = "Sales summaries and item popularity"),
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, serving the generated document at
/// `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
