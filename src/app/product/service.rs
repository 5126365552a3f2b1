//! 产品业务服务

use tracing::{info, warn};

use super::model::{Product, ProductPayload};
use crate::core::{
    action::Action,
    error::CoreError,
    pagination::{PageQuery, PageRequest},
};
use crate::infrastructure::database::{is_foreign_key_violation, DbPools};

const PRODUCT_COLUMNS: &str = "id, title, brand, price, image, review_score";

pub const PRODUCT_IN_WISHLIST: &str = "This product is still in at least one customer's wishlist.";

#[derive(Clone)]
pub struct ProductService {
    db: DbPools,
}

impl ProductService {
    pub fn new(db: DbPools) -> Self {
        Self { db }
    }

    /// 分页列出产品，最新创建的在前
    pub async fn list_products(
        &self,
        query: &PageQuery,
    ) -> Result<(Vec<Product>, i64, PageRequest), CoreError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.db.reader)
            .await?;
        let request = query.resolve(total)?;

        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id DESC LIMIT ? OFFSET ?"
        ))
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.db.reader)
        .await?;

        Ok((products, total, request))
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, CoreError> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.db.reader)
        .await?
        .ok_or_else(|| not_found(id))
    }

    pub async fn create_product(&self, payload: ProductPayload) -> Result<Product, CoreError> {
        let draft = payload.into_draft(None, Action::Create)?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (title, brand, price, image, review_score) \
             VALUES (?, ?, ?, ?, ?) RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&draft.title)
        .bind(&draft.brand)
        .bind(draft.price)
        .bind(&draft.image)
        .bind(draft.review_score)
        .fetch_one(&self.db.writer)
        .await?;

        info!("Created product: {} ({})", product.title, product.id);
        Ok(product)
    }

    /// 整体更新或部分更新，由 `action` 决定
    pub async fn update_product(
        &self,
        id: i64,
        payload: ProductPayload,
        action: Action,
    ) -> Result<Product, CoreError> {
        let mut tx = self.db.writer.begin().await?;

        let existing = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found(id))?;

        let draft = payload.into_draft(Some(&existing), action)?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET title = ?, brand = ?, price = ?, image = ?, review_score = ? \
             WHERE id = ? RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&draft.title)
        .bind(&draft.brand)
        .bind(draft.price)
        .bind(&draft.image)
        .bind(draft.review_score)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Updated product: {} ({})", product.title, product.id);
        Ok(product)
    }

    /// 仍在收藏夹中的产品不能删除
    pub async fn delete_product(&self, id: i64) -> Result<(), CoreError> {
        let mut tx = self.db.writer.begin().await?;

        let (references,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM wishlists WHERE product_id = ?")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if references > 0 {
            warn!("Refused to delete product {} referenced by {} wishlist entries", id, references);
            return Err(CoreError::Conflict(PRODUCT_IN_WISHLIST.to_string()));
        }

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    CoreError::Conflict(PRODUCT_IN_WISHLIST.to_string())
                } else {
                    e.into()
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tx.commit().await?;

        info!("Deleted product: {}", id);
        Ok(())
    }
}

fn not_found(id: i64) -> CoreError {
    CoreError::NotFound(format!("Product {} not found.", id))
}
