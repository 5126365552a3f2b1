//! 认证服务：登录、登出、凭据校验

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::credentials::Credentials;
use super::model::{CurrentUser, Session};
use super::password::verify_password;
use crate::app::user::{User, UserService};
use crate::config::MAX_SESSION_TTL_HOURS;
use crate::core::error::CoreError;
use crate::infrastructure::database::DbPools;

#[derive(Clone)]
pub struct AuthService {
    db: DbPools,
    users: UserService,
    session_ttl: Duration,
}

impl AuthService {
    /// 有效期限制在 1 小时到 [`MAX_SESSION_TTL_HOURS`] 之间
    pub fn new(db: DbPools, users: UserService, session_ttl_hours: i64) -> Self {
        Self {
            db,
            users,
            session_ttl: Duration::hours(session_ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS)),
        }
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// 校验用户名密码并开启新会话
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, CoreError> {
        let user = self.check_password(username, password).await?;

        let now = Utc::now();
        sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.db.writer)
            .await?;

        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: user.id,
            expires_at: now + self.session_ttl,
        };
        sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, ?)")
            .bind(&session.token)
            .bind(session.user_id)
            .bind(session.expires_at)
            .execute(&self.db.writer)
            .await?;

        info!("User logged in: {}", user.username);
        Ok(session)
    }

    /// 不存在的会话同样视为成功
    pub async fn logout(&self, token: &str) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.db.writer)
            .await?;
        if result.rows_affected() > 0 {
            info!("Session closed");
        }
        Ok(())
    }

    /// 解析出请求者；凭据无效返回 401
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<CurrentUser, CoreError> {
        match credentials {
            Credentials::Basic { username, password } => {
                let user = self.check_password(username, password).await?;
                Ok(CurrentUser::from(&user))
            }
            Credentials::Session(token) => self.resolve_session(token).await,
        }
    }

    async fn resolve_session(&self, token: &str) -> Result<CurrentUser, CoreError> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT token, user_id, expires_at FROM sessions WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.db.reader)
        .await?
        .ok_or(CoreError::Unauthorized)?;

        if session.is_expired(Utc::now()) {
            debug!("Rejected expired session");
            self.logout(token).await?;
            return Err(CoreError::Unauthorized);
        }

        let user = self.users.get_user(session.user_id).await.map_err(|e| match e {
            CoreError::NotFound(_) => CoreError::Unauthorized,
            other => other,
        })?;
        Ok(CurrentUser::from(&user))
    }

    async fn check_password(&self, username: &str, password: &str) -> Result<User, CoreError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            warn!("Login attempt for unknown user");
            return Err(CoreError::Unauthorized);
        };

        if verify_password(password, &user.password_hash).await {
            Ok(user)
        } else {
            warn!("Wrong password for user: {}", user.username);
            Err(CoreError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::infrastructure::database::DatabaseManager;

    async fn memory_pools() -> DbPools {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..DatabaseConfig::default()
        };
        let db = DatabaseManager::new(&config).await.unwrap();
        db.create_tables().await.unwrap();
        db.into_pools()
    }

    #[tokio::test]
    async fn test_session_ttl_is_bounded() {
        let db = memory_pools().await;
        let users = UserService::new(db.clone());

        let service = AuthService::new(db.clone(), users.clone(), i64::MAX);
        assert_eq!(service.session_ttl(), Duration::hours(MAX_SESSION_TTL_HOURS));

        let service = AuthService::new(db, users, -5);
        assert_eq!(service.session_ttl(), Duration::hours(1));
    }

    #[tokio::test]
    async fn test_login_with_longest_ttl() {
        let db = memory_pools().await;
        let users = UserService::new(db.clone());
        users
            .create_user(crate::app::user::UserPayload {
                username: Some("long_lived".to_string()),
                email: None,
                password: Some("long-lived-pass".to_string()),
            })
            .await
            .unwrap();

        let service = AuthService::new(db, users, i64::MAX);
        let session = service.login("long_lived", "long-lived-pass").await.unwrap();
        assert!(session.expires_at > Utc::now() + Duration::hours(MAX_SESSION_TTL_HOURS - 1));

        let user = service
            .authenticate(&Credentials::Session(session.token))
            .await
            .unwrap();
        assert_eq!(user.username, "long_lived");
    }
}
