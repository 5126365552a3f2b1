//! 用户处理器（仅管理员）

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use super::model::{UserPayload, UserResource, RESOURCE};
use crate::app::AppState;
use crate::core::{
    error::{CoreError, ErrorResponse},
    extract::{ApiJson, ApiQuery, ResourceId},
    pagination::{Page, PageQuery},
};

/// 没有更新操作，PUT/PATCH 返回 405
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/user/", get(list_users).post(create_user))
        .route("/api/user/:id/", get(get_user).delete(delete_user))
}

#[utoipa::path(
    get,
    path = "/api/user/",
    tag = "User",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of users", body = Page<UserResource>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrators only", body = ErrorResponse),
        (status = 404, description = "Invalid page", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Page<UserResource>>, CoreError> {
    let (users, total, request) = state.user_service.list_users(&query).await?;
    let results = users.into_iter().map(UserResource::from).collect();

    Ok(Json(Page::new(
        results,
        total,
        request,
        &state.links.collection(RESOURCE),
    )))
}

#[utoipa::path(
    post,
    path = "/api/user/",
    tag = "User",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = UserResource),
        (status = 400, description = "Invalid data or duplicate username", body = ErrorResponse),
        (status = 403, description = "Administrators only", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UserPayload>,
) -> Result<(StatusCode, Json<UserResource>), CoreError> {
    let user = state.user_service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    get,
    path = "/api/user/{id}/",
    tag = "User",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserResource),
        (status = 403, description = "Administrators only", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<UserResource>, CoreError> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    delete,
    path = "/api/user/{id}/",
    tag = "User",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Administrators only", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, CoreError> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
