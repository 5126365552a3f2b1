//! 收藏夹数据模型

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::app::customer::{Customer, CustomerResource};
use crate::app::product::{Product, ProductResource};
use crate::core::{
    action::{Action, Representation},
    error::{CoreError, FieldErrors},
    response::Links,
};

pub const RESOURCE: &str = "wishlist";

pub const DUPLICATE_PAIR: &str = "The customer already has this product in their wishlist.";

/// `wishlists` 表中的一行
#[derive(Debug, Clone, Copy, PartialEq, sqlx::FromRow)]
pub struct Wishlist {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
}

/// 扁平表示：客户与产品只给出 id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WishlistResource {
    pub id: i64,
    pub customer: i64,
    pub product: i64,
}

/// 展开表示：客户与产品给出完整对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WishlistDetail {
    pub id: i64,
    pub customer: CustomerResource,
    pub product: ProductResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum WishlistView {
    Expanded(WishlistDetail),
    Flat(WishlistResource),
}

impl From<Wishlist> for WishlistResource {
    fn from(link: Wishlist) -> Self {
        Self {
            id: link.id,
            customer: link.customer_id,
            product: link.product_id,
        }
    }
}

/// 一条收藏及其两端的完整记录
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistRecord {
    pub id: i64,
    pub customer: Customer,
    pub product: Product,
}

impl WishlistView {
    pub fn flat(link: Wishlist) -> Self {
        WishlistView::Flat(link.into())
    }

    /// 读操作展开两端，写操作只给 id
    pub fn represent(record: WishlistRecord, action: Action, links: &Links) -> Self {
        match action.representation() {
            Representation::Expanded => WishlistView::Expanded(WishlistDetail {
                id: record.id,
                customer: CustomerResource::new(record.customer),
                product: ProductResource::new(record.product, links),
            }),
            Representation::Flat => WishlistView::Flat(WishlistResource {
                id: record.id,
                customer: record.customer.id,
                product: record.product.id,
            }),
        }
    }
}

/// 创建/更新请求体
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WishlistPayload {
    /// 客户 id
    pub customer: Option<i64>,
    /// 产品 id
    pub product: Option<i64>,
}

/// 待写入的客户/产品组合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WishlistDraft {
    pub customer_id: i64,
    pub product_id: i64,
}

impl WishlistPayload {
    pub fn into_draft(
        self,
        existing: Option<&Wishlist>,
        action: Action,
    ) -> Result<WishlistDraft, CoreError> {
        let base = if action.is_partial() { existing } else { None };
        let customer = self.customer.or_else(|| base.map(|w| w.customer_id));
        let product = self.product.or_else(|| base.map(|w| w.product_id));

        let mut errors = FieldErrors::new();
        errors.require("customer", &customer);
        errors.require("product", &product);

        match (customer, product) {
            (Some(customer_id), Some(product_id)) => Ok(WishlistDraft {
                customer_id,
                product_id,
            }),
            _ => Err(CoreError::Validation(errors)),
        }
    }
}

/// 引用的对象不存在
pub fn invalid_pk(id: i64) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> WishlistRecord {
        WishlistRecord {
            id: 5,
            customer: Customer {
                id: 1,
                name: "Cliente".to_string(),
                email: "c@example.com".to_string(),
            },
            product: Product {
                id: 2,
                title: "Produto".to_string(),
                brand: "Marca".to_string(),
                price: 9.5,
                image: "http://x/img.png".to_string(),
                review_score: Some(4.5),
            },
        }
    }

    #[test]
    fn test_flat_representation_uses_ids() {
        let links = Links::new("http://h");
        for action in [Action::Create, Action::Update, Action::PartialUpdate] {
            let json = serde_json::to_value(WishlistView::represent(record(), action, &links)).unwrap();
            assert_eq!(json, serde_json::json!({"id": 5, "customer": 1, "product": 2}));
        }
    }

    #[test]
    fn test_expanded_representation_nests_objects() {
        let links = Links::new("http://h");
        let json =
            serde_json::to_value(WishlistView::represent(record(), Action::Retrieve, &links)).unwrap();

        assert_eq!(json["customer"]["email"], "c@example.com");
        assert!(json["customer"].get("wishList").is_none());
        assert_eq!(json["product"]["reviewScore"], 4.5);
        assert_eq!(json["product"]["url"], "http://h/api/product/2/");
    }

    #[test]
    fn test_payload_requires_both_sides() {
        let CoreError::Validation(errors) = WishlistPayload::default()
            .into_draft(None, Action::Create)
            .unwrap_err()
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("customer").unwrap(), ["This field is required."]);
        assert_eq!(errors.get("product").unwrap(), ["This field is required."]);
    }

    #[test]
    fn test_partial_update_keeps_other_side() {
        let existing = Wishlist {
            id: 3,
            customer_id: 1,
            product_id: 2,
        };
        let payload = WishlistPayload {
            customer: None,
            product: Some(7),
        };
        let draft = payload
            .into_draft(Some(&existing), Action::PartialUpdate)
            .unwrap();
        assert_eq!(
            draft,
            WishlistDraft {
                customer_id: 1,
                product_id: 7
            }
        );
    }

    #[test]
    fn test_invalid_pk_message() {
        assert_eq!(invalid_pk(42), "Invalid pk \"42\" - object does not exist.");
    }
}
