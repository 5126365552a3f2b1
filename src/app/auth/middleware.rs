//! 认证与授权中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::credentials::Credentials;
use super::model::CurrentUser;
use crate::app::AppState;
use crate::core::error::CoreError;
use crate::core::middleware::RequestActor;

/// 要求已认证；通过后把 `CurrentUser` 放入请求扩展，用户名记入响应供访问日志使用
pub async fn require_authentication(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, CoreError> {
    let credentials = Credentials::from_headers(req.headers()).ok_or(CoreError::Unauthorized)?;
    let user = state.auth_service.authenticate(&credentials).await?;

    debug!("Authenticated request as {}", user.username);
    let actor = RequestActor(user.username.clone());
    req.extensions_mut().insert(user);

    let mut response = next.run(req).await;
    response.extensions_mut().insert(actor);
    Ok(response)
}

/// 要求管理员，需位于 `require_authentication` 之内
pub async fn require_admin(req: Request, next: Next) -> Result<Response, CoreError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .ok_or(CoreError::Unauthorized)?;

    if !user.is_admin {
        warn!("Non-admin user {} denied access to {}", user.username, req.uri().path());
        return Err(CoreError::Forbidden);
    }
    Ok(next.run(req).await)
}
