//! 产品处理器

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use super::model::{ProductPayload, ProductResource, RESOURCE};
use crate::app::AppState;
use crate::core::{
    action::Action,
    error::{CoreError, ErrorResponse},
    extract::{ApiJson, ApiQuery, ResourceId},
    pagination::{Page, PageQuery},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/product/", get(list_products).post(create_product))
        .route(
            "/api/product/:id/",
            get(get_product)
                .put(update_product)
                .patch(partial_update_product)
                .delete(delete_product),
        )
}

/// 分页列出产品
#[utoipa::path(
    get,
    path = "/api/product/",
    tag = "Product",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of products, newest first", body = Page<ProductResource>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Invalid page", body = ErrorResponse)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Page<ProductResource>>, CoreError> {
    let (products, total, request) = state.product_service.list_products(&query).await?;
    let results = products
        .into_iter()
        .map(|product| ProductResource::new(product, &state.links))
        .collect();

    Ok(Json(Page::new(
        results,
        total,
        request,
        &state.links.collection(RESOURCE),
    )))
}

#[utoipa::path(
    post,
    path = "/api/product/",
    tag = "Product",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = ProductResource),
        (status = 400, description = "Invalid data", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> Result<(StatusCode, Json<ProductResource>), CoreError> {
    let product = state.product_service.create_product(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductResource::new(product, &state.links)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/product/{id}/",
    tag = "Product",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = ProductResource),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Unknown product", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<ProductResource>, CoreError> {
    let product = state.product_service.get_product(id).await?;
    Ok(Json(ProductResource::new(product, &state.links)))
}

#[utoipa::path(
    put,
    path = "/api/product/{id}/",
    tag = "Product",
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product replaced", body = ProductResource),
        (status = 400, description = "Invalid data", body = ErrorResponse),
        (status = 404, description = "Unknown product", body = ErrorResponse)
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> Result<Json<ProductResource>, CoreError> {
    let product = state
        .product_service
        .update_product(id, payload, Action::Update)
        .await?;
    Ok(Json(ProductResource::new(product, &state.links)))
}

#[utoipa::path(
    patch,
    path = "/api/product/{id}/",
    tag = "Product",
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated", body = ProductResource),
        (status = 400, description = "Invalid data", body = ErrorResponse),
        (status = 404, description = "Unknown product", body = ErrorResponse)
    )
)]
pub async fn partial_update_product(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> Result<Json<ProductResource>, CoreError> {
    let product = state
        .product_service
        .update_product(id, payload, Action::PartialUpdate)
        .await?;
    Ok(Json(ProductResource::new(product, &state.links)))
}

#[utoipa::path(
    delete,
    path = "/api/product/{id}/",
    tag = "Product",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Unknown product", body = ErrorResponse),
        (status = 409, description = "Product is still in a wishlist", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, CoreError> {
    state.product_service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
