//! 身份认证：密码、会话、凭据与访问控制

pub mod credentials;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod password;
pub mod service;

pub use credentials::Credentials;
pub use model::{CurrentUser, LoginRequest, LoginResponse};
pub use service::AuthService;
