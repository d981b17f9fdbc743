// src/db/inventory_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{CreateStockItemPayload, StockItem, UpdateStockItemPayload},
};

const STOCK_ITEM_COLUMNS: &str =
    "id, org_id, name, category, quantity, min_threshold, max_capacity, price, cost_price, created_at, updated_at";

/// The fields a sale or loss needs from a locked item.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct LockedItem {
    pub quantity: i32,
    pub price: Decimal,
    pub cost_price: Decimal,
}

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_item(&self, org_id: Uuid, payload: &CreateStockItemPayload) -> Result<StockItem, AppError> {
        let query = format!(
            r#"
            INSERT INTO stock_items (org_id, name, category, quantity, min_threshold, max_capacity, price, cost_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {STOCK_ITEM_COLUMNS}
            "#
        );
        let item = sqlx::query_as::<_, StockItem>(&query)
            .bind(org_id)
            .bind(&payload.name)
            .bind(&payload.category)
            .bind(payload.quantity)
            .bind(payload.min_threshold)
            .bind(payload.max_capacity)
            .bind(payload.price)
            .bind(payload.cost_price)
            .fetch_one(&self.pool)
            .await?;
        Ok(item)
    }

    /// Items of one organization, newest first.
    pub async fn list_items(&self, org_id: Uuid) -> Result<Vec<StockItem>, AppError> {
        let query = format!(
            "SELECT {STOCK_ITEM_COLUMNS} FROM stock_items WHERE org_id = $1 ORDER BY created_at DESC"
        );
        let items = sqlx::query_as::<_, StockItem>(&query)
            .bind(org_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    /// Applies the supplied fields only. `None` when the item is not in `org_id`.
    pub async fn update_item(
        &self,
        id: Uuid,
        org_id: Uuid,
        payload: &UpdateStockItemPayload,
    ) -> Result<Option<StockItem>, AppError> {
        let query = format!(
            r#"
            UPDATE stock_items SET
                name = COALESCE($3, name),
                category = COALESCE($4, category),
                quantity = COALESCE($5, quantity),
                min_threshold = COALESCE($6, min_threshold),
                max_capacity = COALESCE($7, max_capacity),
                price = COALESCE($8, price),
                cost_price = COALESCE($9, cost_price),
                updated_at = NOW()
            WHERE id = $1 AND org_id = $2
            RETURNING {STOCK_ITEM_COLUMNS}
            "#
        );
        let item = sqlx::query_as::<_, StockItem>(&query)
            .bind(id)
            .bind(org_id)
            .bind(payload.name.as_deref())
            .bind(payload.category.as_deref())
            .bind(payload.quantity)
            .bind(payload.min_threshold)
            .bind(payload.max_capacity)
            .bind(payload.price)
            .bind(payload.cost_price)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    pub async fn delete_item(&self, id: Uuid, org_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM stock_items WHERE id = $1 AND org_id = $2")
            .bind(id)
            .bind(org_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Row-locks the item for the rest of the transaction.
    pub async fn lock_item<'e, E>(&self, executor: E, id: Uuid, org_id: Uuid) -> Result<Option<LockedItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, LockedItem>(
            r#"
            SELECT quantity, price, cost_price
            FROM stock_items
            WHERE id = $1 AND org_id = $2
            FOR UPDATE
            "#,
        )
        .bind(id)
        .bind(org_id)
        .fetch_optional(executor)
        .await?;
        Ok(item)
    }

    /// Decrements the quantity. Returns false (and changes nothing) if it would go negative.
    pub async fn deduct_quantity<'e, E>(&self, executor: E, id: Uuid, amount: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE stock_items
            SET quantity = quantity - $2, updated_at = NOW()
            WHERE id = $1 AND quantity >= $2
            "#,
        )
        .bind(id)
        .bind(amount)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
