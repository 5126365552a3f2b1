//! 应用层：状态、路由组装与各资源模块

pub mod auth;
pub mod customer;
pub mod docs;
pub mod product;
pub mod user;
pub mod wishlist;

use axum::{
    extract::State,
    middleware,
    response::{Json, Redirect},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::core::{
    error::CoreError,
    middleware::request_logging_middleware,
    response::{ApiIndex, Links},
};
use crate::infrastructure::database::{DatabaseManager, DbPools};
use auth::middleware::{require_admin, require_authentication};
use auth::AuthService;
use customer::CustomerService;
use product::ProductService;
use user::UserService;
use wishlist::WishlistService;

/// 应用状态，所有处理器共享
#[derive(Clone)]
pub struct AppState {
    pub db: DbPools,
    pub links: Links,
    pub product_service: ProductService,
    pub customer_service: CustomerService,
    pub wishlist_service: WishlistService,
    pub user_service: UserService,
    pub auth_service: AuthService,
}

impl AppState {
    /// 用已有连接池构建服务
    pub fn new(db: DbPools, config: &Config) -> Self {
        let user_service = UserService::new(db.clone());
        Self {
            links: Links::new(&config.server.public_url),
            product_service: ProductService::new(db.clone()),
            customer_service: CustomerService::new(db.clone()),
            wishlist_service: WishlistService::new(db.clone()),
            auth_service: AuthService::new(
                db.clone(),
                user_service.clone(),
                config.auth.session_ttl_hours,
            ),
            user_service,
            db,
        }
    }

    /// 连接数据库、建表、创建配置中的管理员
    pub async fn build(config: &Config) -> anyhow::Result<Self> {
        let db = DatabaseManager::new(&config.database).await?;
        db.create_tables().await?;

        let state = Self::new(db.into_pools(), config);
        if let Some(admin) = &config.admin {
            state.user_service.ensure_admin(admin).await?;
        }
        Ok(state)
    }
}

/// 组装完整路由
pub fn router(state: AppState) -> Router {
    let admin_routes = user::handler::routes().route_layer(middleware::from_fn(require_admin));

    let protected = Router::new()
        .merge(customer::handler::routes())
        .merge(product::handler::routes())
        .merge(wishlist::handler::routes())
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authentication,
        ));

    Router::new()
        .route("/", get(|| async { Redirect::to("/api/") }))
        .route("/api/", get(api_index))
        .route("/health", get(health_check))
        .merge(auth::handler::routes())
        .merge(docs::routes())
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}

/// 资源索引
async fn api_index(State(state): State<AppState>) -> Json<ApiIndex> {
    Json(ApiIndex::new(&state.links))
}

// 健康检查
async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>, CoreError> {
    sqlx::query("SELECT 1").execute(&state.db.reader).await?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "database": "connected",
        "timestamp": chrono::Utc::now()
    })))
}

/// 打印可用端点
pub fn log_endpoints(address: &str) {
    info!("🚀 Wishlist API running on http://{}", address);
    info!("📊 Available endpoints:");
    info!("   GET    /api/                 - Resource index");
    info!("   *      /api/customer/        - Customers (expanded wish list on reads)");
    info!("   *      /api/product/         - Products (paginated, newest first)");
    info!("   *      /api/wishlist/        - Customer to product links");
    info!("   *      /api/user/            - Users (administrators only)");
    info!("   POST   /api-auth/login/      - Open a session");
    info!("   GET    /schema/              - OpenAPI document");
    info!("   GET    /swagger-ui/          - API browser");
    info!("   GET    /health               - Health check");
}
