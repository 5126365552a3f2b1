//! 访问日志中间件

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// 认证通过的请求者，由认证中间件写入响应扩展，供访问日志读取
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestActor(pub String);

/// 匿名请求记为 `-`
fn actor_of(response: &Response) -> &str {
    response
        .extensions()
        .get::<RequestActor>()
        .map(|actor| actor.0.as_str())
        .unwrap_or("-")
}

/// 每个请求一行访问日志：方法、路径、状态、耗时、请求者
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let user = actor_of(&response);

    if response.status().is_server_error() {
        warn!(%method, %path, status, elapsed_ms, user, "request failed");
    } else {
        info!(%method, %path, status, elapsed_ms, user, "request completed");
    }

    response
}
