//! 客户业务服务

use sqlx::SqliteConnection;
use std::collections::HashMap;
use tracing::{info, warn};

use super::model::{Customer, CustomerDraft, CustomerPayload, CustomerView, DUPLICATE_EMAIL};
use crate::app::product::Product;
use crate::core::{
    action::{Action, Representation},
    error::CoreError,
    response::Links,
};
use crate::infrastructure::database::{is_foreign_key_violation, is_unique_violation, DbPools};

pub const CUSTOMER_HAS_WISHLIST: &str = "This customer still has products in their wishlist.";

/// 收藏夹中的一项：所属客户 + 产品
#[derive(Debug, sqlx::FromRow)]
struct WishListEntry {
    customer_id: i64,
    #[sqlx(flatten)]
    product: Product,
}

const WISH_LIST_QUERY: &str = "SELECT w.customer_id, p.id, p.title, p.brand, p.price, p.image, p.review_score \
     FROM wishlists w JOIN products p ON p.id = w.product_id";

#[derive(Clone)]
pub struct CustomerService {
    db: DbPools,
}

impl CustomerService {
    pub fn new(db: DbPools) -> Self {
        Self { db }
    }

    /// 全部客户，不分页
    pub async fn list_customers(&self) -> Result<Vec<Customer>, CoreError> {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT id, name, email FROM customers ORDER BY id")
                .fetch_all(&self.db.reader)
                .await?;
        Ok(customers)
    }

    pub async fn get_customer(&self, id: i64) -> Result<Customer, CoreError> {
        sqlx::query_as::<_, Customer>("SELECT id, name, email FROM customers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db.reader)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// 客户收藏的产品，按加入顺序
    pub async fn wish_list(&self, customer_id: i64) -> Result<Vec<Product>, CoreError> {
        let entries = sqlx::query_as::<_, WishListEntry>(&format!(
            "{WISH_LIST_QUERY} WHERE w.customer_id = ? ORDER BY w.id"
        ))
        .bind(customer_id)
        .fetch_all(&self.db.reader)
        .await?;

        Ok(entries.into_iter().map(|entry| entry.product).collect())
    }

    /// 按操作类型生成单个客户的表示
    pub async fn render(
        &self,
        customer: Customer,
        action: Action,
        links: &Links,
    ) -> Result<CustomerView, CoreError> {
        let wish_list = match action.representation() {
            Representation::Expanded => self.wish_list(customer.id).await?,
            Representation::Flat => Vec::new(),
        };
        Ok(CustomerView::represent(customer, wish_list, action, links))
    }

    /// 批量生成表示；展开形式只查询一次收藏表
    pub async fn render_all(
        &self,
        customers: Vec<Customer>,
        action: Action,
        links: &Links,
    ) -> Result<Vec<CustomerView>, CoreError> {
        let mut wish_lists: HashMap<i64, Vec<Product>> = HashMap::new();
        if action.representation() == Representation::Expanded {
            let entries = sqlx::query_as::<_, WishListEntry>(&format!("{WISH_LIST_QUERY} ORDER BY w.id"))
                .fetch_all(&self.db.reader)
                .await?;
            for entry in entries {
                wish_lists
                    .entry(entry.customer_id)
                    .or_default()
                    .push(entry.product);
            }
        }

        Ok(customers
            .into_iter()
            .map(|customer| {
                let wish_list = wish_lists.remove(&customer.id).unwrap_or_default();
                CustomerView::represent(customer, wish_list, action, links)
            })
            .collect())
    }

    pub async fn create_customer(&self, payload: CustomerPayload) -> Result<Customer, CoreError> {
        let draft = payload.into_draft(None, Action::Create)?;

        let mut tx = self.db.writer.begin().await?;
        ensure_email_available(&mut tx, &draft.email, None).await?;

        let customer = sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (name, email) VALUES (?, ?) RETURNING id, name, email",
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(translate_write_error)?;

        tx.commit().await?;

        info!("Created customer: {} ({})", customer.name, customer.id);
        Ok(customer)
    }

    pub async fn update_customer(
        &self,
        id: i64,
        payload: CustomerPayload,
        action: Action,
    ) -> Result<Customer, CoreError> {
        let mut tx = self.db.writer.begin().await?;

        let existing =
            sqlx::query_as::<_, Customer>("SELECT id, name, email FROM customers WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| not_found(id))?;

        let CustomerDraft { name, email } = payload.into_draft(Some(&existing), action)?;
        ensure_email_available(&mut tx, &email, Some(id)).await?;

        let customer = sqlx::query_as::<_, Customer>(
            "UPDATE customers SET name = ?, email = ? WHERE id = ? RETURNING id, name, email",
        )
        .bind(&name)
        .bind(&email)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(translate_write_error)?;

        tx.commit().await?;

        info!("Updated customer: {} ({})", customer.name, customer.id);
        Ok(customer)
    }

    /// 收藏夹非空的客户不能删除
    pub async fn delete_customer(&self, id: i64) -> Result<(), CoreError> {
        let mut tx = self.db.writer.begin().await?;

        let (references,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM wishlists WHERE customer_id = ?")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if references > 0 {
            warn!("Refused to delete customer {} with {} wishlist entries", id, references);
            return Err(CoreError::Conflict(CUSTOMER_HAS_WISHLIST.to_string()));
        }

        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(translate_write_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tx.commit().await?;

        info!("Deleted customer: {}", id);
        Ok(())
    }
}

/// 邮箱唯一；更新时排除自身
async fn ensure_email_available(
    conn: &mut SqliteConnection,
    email: &str,
    exclude_id: Option<i64>,
) -> Result<(), CoreError> {
    let taken: Option<(i64,)> = sqlx::query_as("SELECT id FROM customers WHERE email = ? AND id != ?")
        .bind(email)
        .bind(exclude_id.unwrap_or(0))
        .fetch_optional(&mut *conn)
        .await?;

    if taken.is_some() {
        warn!("Rejected duplicate customer email");
        return Err(CoreError::field("email", DUPLICATE_EMAIL));
    }
    Ok(())
}

/// 并发写入越过应用层检查时，约束错误转换为同样的用户提示
fn translate_write_error(err: sqlx::Error) -> CoreError {
    if is_unique_violation(&err) {
        CoreError::field("email", DUPLICATE_EMAIL)
    } else if is_foreign_key_violation(&err) {
        CoreError::Conflict(CUSTOMER_HAS_WISHLIST.to_string())
    } else {
        err.into()
    }
}

fn not_found(id: i64) -> CoreError {
    CoreError::NotFound(format!("Customer {} not found.", id))
}
