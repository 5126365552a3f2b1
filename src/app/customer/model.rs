//! 客户数据模型

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::app::product::{Product, ProductResource};
use crate::core::{
    action::{Action, Representation},
    error::{CoreError, FieldErrors},
    extract::trim_text,
    response::Links,
};

pub const RESOURCE: &str = "customer";

pub const DUPLICATE_EMAIL: &str = "A customer with this email is already registered.";

/// `customers` 表中的一行
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// 扁平表示：id、姓名、邮箱
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerResource {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// 展开表示：附带收藏夹中的完整产品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerDetail {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(rename = "wishList")]
    pub wish_list: Vec<ProductResource>,
}

/// 按操作类型选出的客户表示
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CustomerView {
    Expanded(CustomerDetail),
    Flat(CustomerResource),
}

impl CustomerResource {
    pub fn new(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
        }
    }
}

impl CustomerDetail {
    pub fn new(customer: Customer, wish_list: Vec<Product>, links: &Links) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            wish_list: wish_list
                .into_iter()
                .map(|product| ProductResource::new(product, links))
                .collect(),
        }
    }
}

impl CustomerView {
    /// 读操作展开收藏夹，写操作只返回客户本身
    ///
    /// `wish_list` 只在展开形式下使用。
    pub fn represent(
        customer: Customer,
        wish_list: Vec<Product>,
        action: Action,
        links: &Links,
    ) -> Self {
        match action.representation() {
            Representation::Expanded => {
                CustomerView::Expanded(CustomerDetail::new(customer, wish_list, links))
            }
            Representation::Flat => CustomerView::Flat(CustomerResource::new(customer)),
        }
    }
}

/// 创建/更新请求体
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CustomerPayload {
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub name: Option<String>,
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 50, message = "Ensure this field has no more than 50 characters.")
    )]
    pub email: Option<String>,
}

/// 校验通过的客户字段
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
}

impl CustomerPayload {
    pub fn into_draft(
        mut self,
        existing: Option<&Customer>,
        action: Action,
    ) -> Result<CustomerDraft, CoreError> {
        trim_text(&mut self.name);
        trim_text(&mut self.email);

        let mut errors = FieldErrors::new();
        errors.not_blank("name", &self.name);
        errors.not_blank("email", &self.email);
        if let Err(e) = self.validate() {
            errors.merge(e.into());
        }

        let base = if action.is_partial() { existing } else { None };
        let name = self.name.or_else(|| base.map(|c| c.name.clone()));
        let email = self.email.or_else(|| base.map(|c| c.email.clone()));

        errors.require("name", &name);
        errors.require("email", &email);

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(CustomerDraft { name, email }),
            _ => Err(CoreError::Validation(errors)),
        }
    }
}
