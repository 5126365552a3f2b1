//! # Wishlist API
//!
//! 客户、产品以及客户收藏夹的 HTTP 服务：
//! - 客户与收藏夹按操作类型选择展开/扁平表示
//! - 产品与用户列表分页
//! - Basic / 会话令牌认证，用户管理仅限管理员
//! - SQLite 存储，OpenAPI 文档

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{router, AppState};
pub use config::{Config, ConfigError};
pub use crate::core::error::CoreError;
