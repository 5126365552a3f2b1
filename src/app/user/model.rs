//! 用户数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::core::{
    error::{CoreError, FieldErrors},
    extract::trim_text,
};

pub const RESOURCE: &str = "user";

pub const DUPLICATE_USERNAME: &str = "A user with that username already exists.";

/// `users` 表中的一行
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub date_joined: DateTime<Utc>,
}

/// 对外表示，不含密码
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResource {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserResource {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// 创建用户请求体
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UserPayload {
    #[validate(
        length(max = 150, message = "Ensure this field has no more than 150 characters."),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this field has no more than 254 characters.")
    )]
    pub email: Option<String>,
    /// 只写字段
    pub password: Option<String>,
}

/// 校验通过的新用户
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_alphanumeric() || "@.+-_".contains(c);
    if username.chars().all(allowed) {
        Ok(())
    } else {
        Err(ValidationError::new("username").with_message(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                .into(),
        ))
    }
}

impl UserPayload {
    pub fn into_new_user(mut self) -> Result<NewUser, CoreError> {
        trim_text(&mut self.username);
        trim_text(&mut self.email);
        // 邮箱可以留空
        if self.email.as_deref() == Some("") {
            self.email = None;
        }

        let mut errors = FieldErrors::new();
        errors.not_blank("username", &self.username);
        if matches!(self.password.as_deref(), Some("")) {
            errors.add("password", "This field may not be blank.");
        }
        if let Err(e) = self.validate() {
            errors.merge(e.into());
        }
        errors.require("username", &self.username);
        errors.require("password", &self.password);

        match (self.username, self.password) {
            (Some(username), Some(password)) if errors.is_empty() => Ok(NewUser {
                username,
                email: self.email.unwrap_or_default(),
                password,
            }),
            _ => Err(CoreError::Validation(errors)),
        }
    }
}
