//! 收藏夹业务服务

use sqlx::SqliteConnection;
use tracing::{info, warn};

use super::model::{
    invalid_pk, Wishlist, WishlistDraft, WishlistPayload, WishlistRecord, DUPLICATE_PAIR,
};
use crate::app::customer::Customer;
use crate::app::product::Product;
use crate::core::{
    action::Action,
    error::{CoreError, FieldErrors, NON_FIELD_ERRORS},
};
use crate::infrastructure::database::{is_foreign_key_violation, is_unique_violation, DbPools};

/// 收藏连同客户、产品的联表查询；内连接跳过悬空引用
const RECORD_QUERY: &str = "SELECT w.id, \
     c.id AS customer_id, c.name AS customer_name, c.email AS customer_email, \
     p.id AS product_id, p.title AS product_title, p.brand AS product_brand, \
     p.price AS product_price, p.image AS product_image, p.review_score AS product_review_score \
     FROM wishlists w \
     JOIN customers c ON c.id = w.customer_id \
     JOIN products p ON p.id = w.product_id";

#[derive(Debug, sqlx::FromRow)]
struct RecordRow {
    id: i64,
    customer_id: i64,
    customer_name: String,
    customer_email: String,
    product_id: i64,
    product_title: String,
    product_brand: String,
    product_price: f64,
    product_image: String,
    product_review_score: Option<f64>,
}

impl From<RecordRow> for WishlistRecord {
    fn from(row: RecordRow) -> Self {
        Self {
            id: row.id,
            customer: Customer {
                id: row.customer_id,
                name: row.customer_name,
                email: row.customer_email,
            },
            product: Product {
                id: row.product_id,
                title: row.product_title,
                brand: row.product_brand,
                price: row.product_price,
                image: row.product_image,
                review_score: row.product_review_score,
            },
        }
    }
}

#[derive(Clone)]
pub struct WishlistService {
    db: DbPools,
}

impl WishlistService {
    pub fn new(db: DbPools) -> Self {
        Self { db }
    }

    /// 全部收藏，不分页
    pub async fn list_wishlists(&self) -> Result<Vec<WishlistRecord>, CoreError> {
        let rows = sqlx::query_as::<_, RecordRow>(&format!("{RECORD_QUERY} ORDER BY w.id"))
            .fetch_all(&self.db.reader)
            .await?;
        Ok(rows.into_iter().map(WishlistRecord::from).collect())
    }

    pub async fn get_wishlist(&self, id: i64) -> Result<WishlistRecord, CoreError> {
        sqlx::query_as::<_, RecordRow>(&format!("{RECORD_QUERY} WHERE w.id = ?"))
            .bind(id)
            .fetch_optional(&self.db.reader)
            .await?
            .map(WishlistRecord::from)
            .ok_or_else(|| not_found(id))
    }

    pub async fn create_wishlist(&self, payload: WishlistPayload) -> Result<Wishlist, CoreError> {
        let draft = payload.into_draft(None, Action::Create)?;

        let mut tx = self.db.writer.begin().await?;
        check_draft(&mut tx, &draft, None).await?;

        let link = sqlx::query_as::<_, Wishlist>(
            "INSERT INTO wishlists (customer_id, product_id) VALUES (?, ?) \
             RETURNING id, customer_id, product_id",
        )
        .bind(draft.customer_id)
        .bind(draft.product_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(translate_write_error)?;

        tx.commit().await?;

        info!(
            "Added product {} to wishlist of customer {} ({})",
            link.product_id, link.customer_id, link.id
        );
        Ok(link)
    }

    pub async fn update_wishlist(
        &self,
        id: i64,
        payload: WishlistPayload,
        action: Action,
    ) -> Result<Wishlist, CoreError> {
        let mut tx = self.db.writer.begin().await?;

        let existing = sqlx::query_as::<_, Wishlist>(
            "SELECT id, customer_id, product_id FROM wishlists WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found(id))?;

        let draft = payload.into_draft(Some(&existing), action)?;
        check_draft(&mut tx, &draft, Some(id)).await?;

        let link = sqlx::query_as::<_, Wishlist>(
            "UPDATE wishlists SET customer_id = ?, product_id = ? WHERE id = ? \
             RETURNING id, customer_id, product_id",
        )
        .bind(draft.customer_id)
        .bind(draft.product_id)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(translate_write_error)?;

        tx.commit().await?;

        info!("Updated wishlist entry: {}", link.id);
        Ok(link)
    }

    pub async fn delete_wishlist(&self, id: i64) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM wishlists WHERE id = ?")
            .bind(id)
            .execute(&self.db.writer)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        info!("Deleted wishlist entry: {}", id);
        Ok(())
    }
}

/// 两端必须存在，且组合唯一（更新时排除自身）
async fn check_draft(
    conn: &mut SqliteConnection,
    draft: &WishlistDraft,
    exclude_id: Option<i64>,
) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();

    let customer: Option<(i64,)> = sqlx::query_as("SELECT id FROM customers WHERE id = ?")
        .bind(draft.customer_id)
        .fetch_optional(&mut *conn)
        .await?;
    if customer.is_none() {
        errors.add("customer", invalid_pk(draft.customer_id));
    }

    let product: Option<(i64,)> = sqlx::query_as("SELECT id FROM products WHERE id = ?")
        .bind(draft.product_id)
        .fetch_optional(&mut *conn)
        .await?;
    if product.is_none() {
        errors.add("product", invalid_pk(draft.product_id));
    }

    errors.into_result()?;

    let taken: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM wishlists WHERE customer_id = ? AND product_id = ? AND id != ?",
    )
    .bind(draft.customer_id)
    .bind(draft.product_id)
    .bind(exclude_id.unwrap_or(0))
    .fetch_optional(&mut *conn)
    .await?;

    if taken.is_some() {
        warn!(
            "Rejected duplicate wishlist entry: customer {} product {}",
            draft.customer_id, draft.product_id
        );
        return Err(CoreError::field(NON_FIELD_ERRORS, DUPLICATE_PAIR));
    }
    Ok(())
}

fn translate_write_error(err: sqlx::Error) -> CoreError {
    if is_unique_violation(&err) {
        CoreError::field(NON_FIELD_ERRORS, DUPLICATE_PAIR)
    } else if is_foreign_key_violation(&err) {
        CoreError::field(
            NON_FIELD_ERRORS,
            "The referenced customer or product no longer exists.",
        )
    } else {
        err.into()
    }
}

fn not_found(id: i64) -> CoreError {
    CoreError::NotFound(format!("Wishlist entry {} not found.", id))
}
