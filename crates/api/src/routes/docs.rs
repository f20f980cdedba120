//! OpenAPI document and Swagger UI page.

use axum::{Json, Router, response::Html, routing::get};
use utoipa::OpenApi;

use crate::AppState;

/// OpenAPI description of the HTTP surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::accounts::create_account,
        crate::routes::accounts::get_account,
        crate::routes::accounts::find_account,
        crate::routes::transactions::create_transaction,
    ),
    components(
        schemas(
            crate::routes::health::HealthResponse,
            crate::routes::accounts::CreateAccountRequest,
            crate::routes::accounts::AccountResponse,
            crate::routes::transactions::CreateTransactionRequest,
            crate::routes::transactions::TransactionResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "accounts", description = "Account registration and lookup"),
        (name = "transactions", description = "Append-only transaction ledger"),
    ),
    info(
        title = "Tallybook API",
        description = "Accounts identified by document number, and transactions whose sign is set by their operation type.",
    ),
)]
pub struct ApiDoc;

const SWAGGER_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Tallybook API</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
      window.onload = () => {
        window.ui = SwaggerUIBundle({ url: '/openapi.json', dom_id: '#swagger-ui' });
      };
    </script>
  </body>
</html>
"#;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn swagger_page() -> Html<&'static str> {
    Html(SWAGGER_PAGE)
}

/// Creates the documentation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(swagger_page))
}
