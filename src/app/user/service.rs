//! 用户业务服务

use chrono::Utc;
use tracing::{info, warn};

use super::model::{NewUser, User, UserPayload, DUPLICATE_USERNAME};
use crate::app::auth::password::hash_password;
use crate::config::AdminConfig;
use crate::core::{
    error::CoreError,
    pagination::{PageQuery, PageRequest},
};
use crate::infrastructure::database::{is_unique_violation, DbPools};

const USER_COLUMNS: &str = "id, username, email, password_hash, is_admin, date_joined";

#[derive(Clone)]
pub struct UserService {
    db: DbPools,
}

impl UserService {
    pub fn new(db: DbPools) -> Self {
        Self { db }
    }

    pub async fn list_users(
        &self,
        query: &PageQuery,
    ) -> Result<(Vec<User>, i64, PageRequest), CoreError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db.reader)
            .await?;
        let request = query.resolve(total)?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.db.reader)
        .await?;

        Ok((users, total, request))
    }

    pub async fn get_user(&self, id: i64) -> Result<User, CoreError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.db.reader)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("User {} not found.", id)))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, CoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.db.reader)
        .await?;
        Ok(user)
    }

    /// 通过 API 创建的用户不是管理员
    pub async fn create_user(&self, payload: UserPayload) -> Result<User, CoreError> {
        let new_user = payload.into_new_user()?;
        self.insert(new_user, false).await
    }

    /// 配置中的管理员不存在时创建
    pub async fn ensure_admin(&self, admin: &AdminConfig) -> Result<(), CoreError> {
        if self.find_by_username(&admin.username).await?.is_some() {
            return Ok(());
        }

        let new_user = NewUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password: admin.password.clone(),
        };
        let user = self.insert(new_user, true).await?;
        info!("Bootstrapped administrator: {} ({})", user.username, user.id);
        Ok(())
    }

    /// 会话随用户一起删除
    pub async fn delete_user(&self, id: i64) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.db.writer)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("User {} not found.", id)));
        }

        info!("Deleted user: {}", id);
        Ok(())
    }

    async fn insert(&self, new_user: NewUser, is_admin: bool) -> Result<User, CoreError> {
        if self.find_by_username(&new_user.username).await?.is_some() {
            warn!("Rejected duplicate username");
            return Err(CoreError::field("username", DUPLICATE_USERNAME));
        }

        let password_hash = hash_password(&new_user.password).await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password_hash, is_admin, date_joined) \
             VALUES (?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&password_hash)
        .bind(is_admin)
        .bind(Utc::now())
        .fetch_one(&self.db.writer)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CoreError::field("username", DUPLICATE_USERNAME)
            } else {
                e.into()
            }
        })?;

        info!("Created user: {} ({})", user.username, user.id);
        Ok(user)
    }
}
