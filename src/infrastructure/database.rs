//! 数据库基础设施

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions},
    Error,
};
use std::{str::FromStr, time::Duration};
use tracing::info;

use crate::config::DatabaseConfig;

/// 建表语句，按依赖顺序执行
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        price REAL NOT NULL CHECK (price >= 0),
        image VARCHAR(200) NOT NULL,
        brand VARCHAR(100) NOT NULL,
        title VARCHAR(100) NOT NULL,
        review_score REAL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(50) NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS wishlists (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_id INTEGER NOT NULL REFERENCES customers (id) ON DELETE RESTRICT,
        product_id INTEGER NOT NULL REFERENCES products (id) ON DELETE RESTRICT,
        UNIQUE (customer_id, product_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS wishlists_product_id ON wishlists (product_id)",
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username VARCHAR(150) NOT NULL UNIQUE,
        email VARCHAR(254) NOT NULL DEFAULT '',
        password_hash TEXT NOT NULL,
        is_admin BOOLEAN NOT NULL DEFAULT 0,
        date_joined TIMESTAMP NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sessions (
        token TEXT PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        expires_at TIMESTAMP NOT NULL
    )
    "#,
];

/// 读写连接池；SQLite 同一时刻只允许一个写事务，写入经由单连接池排队
#[derive(Debug, Clone)]
pub struct DbPools {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

pub struct DatabaseManager {
    pools: DbPools,
}

impl DatabaseManager {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pools = if is_memory_url(&config.url) {
            // 每个连接各有一份内存库，只能保留唯一的长连接
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options)
                .await?;
            DbPools {
                reader: pool.clone(),
                writer: pool,
            }
        } else {
            let timeout = Duration::from_secs(config.acquire_timeout_seconds);
            let options = options
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(timeout);

            let writer = SqlitePoolOptions::new()
                .max_connections(1)
                .acquire_timeout(timeout)
                .connect_with(options.clone())
                .await?;
            let reader = SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .acquire_timeout(timeout)
                .connect_with(options)
                .await?;
            DbPools { reader, writer }
        };

        info!("Connected to database: {}", config.url);
        Ok(Self { pools })
    }

    /// 创建数据库表（幂等）
    pub async fn create_tables(&self) -> Result<(), Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pools.writer).await?;
        }
        info!("Database tables ready");
        Ok(())
    }

    pub fn pools(&self) -> &DbPools {
        &self.pools
    }

    pub fn into_pools(self) -> DbPools {
        self.pools
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// 唯一约束冲突
pub fn is_unique_violation(err: &Error) -> bool {
    matches!(err, Error::Database(db) if db.is_unique_violation())
}

/// 外键约束冲突
pub fn is_foreign_key_violation(err: &Error) -> bool {
    matches!(err, Error::Database(db) if db.is_foreign_key_violation())
}
