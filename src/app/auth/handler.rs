//! 登录/登出处理器

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::post,
    Router,
};

use super::credentials::{session_cookie_header, Credentials, SESSION_COOKIE};
use super::model::{LoginRequest, LoginResponse};
use crate::app::AppState;
use crate::core::{
    error::{CoreError, ErrorResponse},
    extract::ApiJson,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api-auth/login/", post(login))
        .route("/api-auth/logout/", post(logout))
}

/// 用户名密码登录，返回会话令牌并写入 cookie
#[utoipa::path(
    post,
    path = "/api-auth/login/",
    tag = "Auth",
    request_body = LoginRequest,
    security(()),
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Wrong username or password", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let session = state
        .auth_service
        .login(&request.username, &request.password)
        .await?;

    let cookie = session_cookie_header(&session.token, state.auth_service.session_ttl().num_seconds());
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse::from(session)),
    ))
}

/// 结束当前会话；没有会话时同样返回 204
#[utoipa::path(
    post,
    path = "/api-auth/logout/",
    tag = "Auth",
    security(()),
    responses(
        (status = 204, description = "Session closed")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, CoreError> {
    if let Some(Credentials::Session(token)) = Credentials::from_headers(&headers) {
        state.auth_service.logout(&token).await?;
    }

    let expired = format!("{}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0", SESSION_COOKIE);
    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, expired)]))
}
