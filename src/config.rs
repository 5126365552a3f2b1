//! 服务配置
//!
//! 配置来自 TOML 文件（默认 `config/app.toml`，可用 `WISHLIST_CONFIG` 指定），
//! 文件不存在时使用内置默认值，最后再叠加环境变量覆盖。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config/app.toml";

/// 服务配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub server: ServerConfig,
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 认证配置
    pub auth: AuthConfig,
    /// 启动时创建的管理员账号
    pub admin: Option<AdminConfig>,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 绑定地址
    pub bind_address: String,
    /// 端口
    pub port: u16,
    /// 对外访问地址，用于生成资源的绝对链接
    pub public_url: String,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// 获取连接超时（秒）
    pub acquire_timeout_seconds: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 会话有效期上限：10 年
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 10;

/// 认证配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// 会话有效期（小时）
    pub session_ttl_hours: i64,
}

/// 管理员账号
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8000,
            public_url: "http://127.0.0.1:8000".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://wishlist.db".to_string(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_seconds: 8,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        // 两周
        Self {
            session_ttl_hours: 24 * 14,
        }
    }
}

impl Config {
    /// 按默认规则加载：配置文件（可选）+ 环境变量，然后校验
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("WISHLIST_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(address) = std::env::var("WISHLIST_BIND_ADDRESS") {
            self.server.bind_address = address;
        }
        if let Some(port) = std::env::var("WISHLIST_PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Ok(public_url) = std::env::var("WISHLIST_PUBLIC_URL") {
            self.server.public_url = public_url;
        }
        if let Ok(level) = std::env::var("WISHLIST_LOG_LEVEL") {
            self.logging.level = level;
        }

        let username = std::env::var("WISHLIST_ADMIN_USERNAME").ok();
        let password = std::env::var("WISHLIST_ADMIN_PASSWORD").ok();
        if let (Some(username), Some(password)) = (username, password) {
            self.admin = Some(AdminConfig {
                username,
                email: std::env::var("WISHLIST_ADMIN_EMAIL").unwrap_or_default(),
                password,
            });
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port must be greater than 0".to_string()));
        }
        if self.server.bind_address.is_empty() {
            return Err(ConfigError::Validation("server.bind_address must not be empty".to_string()));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Validation("database.url must not be empty".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Validation(format!(
                "database.min_connections ({}) exceeds database.max_connections ({})",
                self.database.min_connections, self.database.max_connections
            )));
        }
        if self.auth.session_ttl_hours <= 0 {
            return Err(ConfigError::Validation(
                "auth.session_ttl_hours must be greater than 0".to_string(),
            ));
        }
        if self.auth.session_ttl_hours > MAX_SESSION_TTL_HOURS {
            return Err(ConfigError::Validation(format!(
                "auth.session_ttl_hours must not exceed {}",
                MAX_SESSION_TTL_HOURS
            )));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "invalid log level: {}, expected one of {:?}",
                self.logging.level, valid_levels
            )));
        }

        if let Some(admin) = &self.admin {
            if admin.username.trim().is_empty() || admin.password.is_empty() {
                return Err(ConfigError::Validation(
                    "admin.username and admin.password must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// 服务监听地址
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(String),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Validation(String),
}
