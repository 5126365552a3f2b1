//! 产品数据模型

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::{
    action::Action,
    error::{CoreError, FieldErrors},
    extract::{double_option, trim_text},
    response::Links,
};

pub const RESOURCE: &str = "product";

/// `products` 表中的一行
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub brand: String,
    pub price: f64,
    pub image: String,
    pub review_score: Option<f64>,
}

/// 产品的对外表示，所有操作共用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResource {
    pub id: i64,
    pub title: String,
    pub brand: String,
    pub price: f64,
    pub image: String,
    /// 评论平均分
    #[serde(rename = "reviewScore")]
    pub review_score: Option<f64>,
    pub url: String,
}

impl ProductResource {
    pub fn new(product: Product, links: &Links) -> Self {
        Self {
            url: links.detail(RESOURCE, product.id),
            id: product.id,
            title: product.title,
            brand: product.brand,
            price: product.price,
            image: product.image,
            review_score: product.review_score,
        }
    }
}

/// 创建/更新请求体；部分更新时字段均可缺省
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub title: Option<String>,
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub brand: Option<String>,
    #[validate(range(min = 0.0, message = "Ensure this value is greater than or equal to 0."))]
    pub price: Option<f64>,
    #[validate(
        url(message = "Enter a valid URL."),
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    pub image: Option<String>,
    /// 可为 null
    #[serde(rename = "reviewScore", default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub review_score: Option<Option<f64>>,
}

/// 校验通过、可直接写库的产品字段
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub brand: String,
    pub price: f64,
    pub image: String,
    pub review_score: Option<f64>,
}

impl ProductPayload {
    /// 校验请求体并与已有记录合并
    ///
    /// 创建和整体更新要求所有必填字段；部分更新缺省的字段沿用 `existing`。
    pub fn into_draft(
        mut self,
        existing: Option<&Product>,
        action: Action,
    ) -> Result<ProductDraft, CoreError> {
        trim_text(&mut self.title);
        trim_text(&mut self.brand);
        trim_text(&mut self.image);

        let mut errors = FieldErrors::new();
        errors.not_blank("title", &self.title);
        errors.not_blank("brand", &self.brand);
        errors.not_blank("image", &self.image);
        if let Err(e) = self.validate() {
            errors.merge(e.into());
        }

        let base = if action.is_partial() { existing } else { None };
        let title = self.title.or_else(|| base.map(|p| p.title.clone()));
        let brand = self.brand.or_else(|| base.map(|p| p.brand.clone()));
        let price = self.price.or_else(|| base.map(|p| p.price));
        let image = self.image.or_else(|| base.map(|p| p.image.clone()));
        // 非必填字段：缺省时保持原值
        let review_score = match self.review_score {
            Some(score) => score,
            None => existing.and_then(|p| p.review_score),
        };

        errors.require("title", &title);
        errors.require("brand", &brand);
        errors.require("price", &price);
        errors.require("image", &image);

        match (title, brand, price, image) {
            (Some(title), Some(brand), Some(price), Some(image)) if errors.is_empty() => {
                Ok(ProductDraft {
                    title,
                    brand,
                    price,
                    image,
                    review_score,
                })
            }
            _ => Err(CoreError::Validation(errors)),
        }
    }
}
