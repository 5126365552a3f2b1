//! 收藏夹处理器

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};

use super::model::{WishlistPayload, WishlistResource, WishlistView};
use crate::app::AppState;
use crate::core::{
    action::Action,
    error::{CoreError, ErrorResponse},
    extract::{ApiJson, ResourceId},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/wishlist/", get(list_wishlists).post(create_wishlist))
        .route(
            "/api/wishlist/:id/",
            get(get_wishlist)
                .put(update_wishlist)
                .patch(partial_update_wishlist)
                .delete(delete_wishlist),
        )
}

/// 列出全部收藏（不分页）
#[utoipa::path(
    get,
    path = "/api/wishlist/",
    tag = "Wishlist",
    responses(
        (status = 200, description = "Every wishlist entry with its customer and product", body = Vec<WishlistView>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_wishlists(
    State(state): State<AppState>,
) -> Result<Json<Vec<WishlistView>>, CoreError> {
    let records = state.wishlist_service.list_wishlists().await?;
    Ok(Json(
        records
            .into_iter()
            .map(|record| WishlistView::represent(record, Action::List, &state.links))
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/wishlist/",
    tag = "Wishlist",
    request_body = WishlistPayload,
    responses(
        (status = 201, description = "Product added to the wishlist", body = WishlistResource),
        (status = 400, description = "Unknown customer/product or duplicate pair", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn create_wishlist(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<WishlistPayload>,
) -> Result<(StatusCode, Json<WishlistView>), CoreError> {
    let link = state.wishlist_service.create_wishlist(payload).await?;
    Ok((StatusCode::CREATED, Json(WishlistView::flat(link))))
}

#[utoipa::path(
    get,
    path = "/api/wishlist/{id}/",
    tag = "Wishlist",
    params(("id" = i64, Path, description = "Wishlist entry id")),
    responses(
        (status = 200, description = "The wishlist entry", body = WishlistView),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Unknown wishlist entry", body = ErrorResponse)
    )
)]
pub async fn get_wishlist(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<WishlistView>, CoreError> {
    let record = state.wishlist_service.get_wishlist(id).await?;
    Ok(Json(WishlistView::represent(
        record,
        Action::Retrieve,
        &state.links,
    )))
}

#[utoipa::path(
    put,
    path = "/api/wishlist/{id}/",
    tag = "Wishlist",
    params(("id" = i64, Path, description = "Wishlist entry id")),
    request_body = WishlistPayload,
    responses(
        (status = 200, description = "Wishlist entry replaced", body = WishlistResource),
        (status = 400, description = "Unknown customer/product or duplicate pair", body = ErrorResponse),
        (status = 404, description = "Unknown wishlist entry", body = ErrorResponse)
    )
)]
pub async fn update_wishlist(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ApiJson(payload): ApiJson<WishlistPayload>,
) -> Result<Json<WishlistView>, CoreError> {
    let link = state
        .wishlist_service
        .update_wishlist(id, payload, Action::Update)
        .await?;
    Ok(Json(WishlistView::flat(link)))
}

#[utoipa::path(
    patch,
    path = "/api/wishlist/{id}/",
    tag = "Wishlist",
    params(("id" = i64, Path, description = "Wishlist entry id")),
    request_body = WishlistPayload,
    responses(
        (status = 200, description = "Wishlist entry updated", body = WishlistResource),
        (status = 400, description = "Unknown customer/product or duplicate pair", body = ErrorResponse),
        (status = 404, description = "Unknown wishlist entry", body = ErrorResponse)
    )
)]
pub async fn partial_update_wishlist(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ApiJson(payload): ApiJson<WishlistPayload>,
) -> Result<Json<WishlistView>, CoreError> {
    let link = state
        .wishlist_service
        .update_wishlist(id, payload, Action::PartialUpdate)
        .await?;
    Ok(Json(WishlistView::flat(link)))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/{id}/",
    tag = "Wishlist",
    params(("id" = i64, Path, description = "Wishlist entry id")),
    responses(
        (status = 204, description = "Wishlist entry removed"),
        (status = 404, description = "Unknown wishlist entry", body = ErrorResponse)
    )
)]
pub async fn delete_wishlist(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, CoreError> {
    state.wishlist_service.delete_wishlist(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
