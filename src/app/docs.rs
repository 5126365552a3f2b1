//! OpenAPI 文档与 Swagger UI 页面

use axum::{
    response::{Html, Json},
    routing::get,
    Router,
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use super::{auth, customer, product, user, wishlist, AppState};
use crate::core::{error::ErrorResponse, response::ApiIndex};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wishlist API",
        description = "Customers, products and the products each customer keeps in their wishlist."
    ),
    paths(
        customer::handler::list_customers,
        customer::handler::create_customer,
        customer::handler::get_customer,
        customer::handler::update_customer,
        customer::handler::partial_update_customer,
        customer::handler::delete_customer,
        product::handler::list_products,
        product::handler::create_product,
        product::handler::get_product,
        product::handler::update_product,
        product::handler::partial_update_product,
        product::handler::delete_product,
        wishlist::handler::list_wishlists,
        wishlist::handler::create_wishlist,
        wishlist::handler::get_wishlist,
        wishlist::handler::update_wishlist,
        wishlist::handler::partial_update_wishlist,
        wishlist::handler::delete_wishlist,
        user::handler::list_users,
        user::handler::create_user,
        user::handler::get_user,
        user::handler::delete_user,
        auth::handler::login,
        auth::handler::logout,
    ),
    components(schemas(ErrorResponse, ApiIndex)),
    modifiers(&SecurityAddon),
    security(("basic_auth" = []), ("bearer_auth" = [])),
    tags(
        (name = "Customer", description = "Customers and their wish lists"),
        (name = "Product", description = "Product catalogue"),
        (name = "Wishlist", description = "Customer to product links"),
        (name = "User", description = "API accounts, administrators only"),
        (name = "Auth", description = "Session login and logout")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "basic_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

const SWAGGER_UI: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Wishlist API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/schema/", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/schema/", get(schema))
        .route("/swagger-ui/", get(swagger_ui))
}

async fn schema() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI)
}
