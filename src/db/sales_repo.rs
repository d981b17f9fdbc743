// src/db/sales_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sales::{Sale, SaleView},
};

#[derive(Clone)]
pub struct SalesRepository {
    pool: PgPool,
}

impl SalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_sale<'e, E>(
        &self,
        executor: E,
        org_id: Uuid,
        stock_item_id: Uuid,
        sold_by: Uuid,
        quantity: i32,
        total_price: Decimal,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (org_id, stock_item_id, sold_by, quantity, total_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, org_id, stock_item_id, sold_by, quantity, total_price, sale_date
            "#,
        )
        .bind(org_id)
        .bind(stock_item_id)
        .bind(sold_by)
        .bind(quantity)
        .bind(total_price)
        .fetch_one(executor)
        .await?;
        Ok(sale)
    }

    /// Sales of one organization with item and seller names, newest first.
    pub async fn list_sales(&self, org_id: Uuid) -> Result<Vec<SaleView>, AppError> {
        let sales = sqlx::query_as::<_, SaleView>(
            r#"
            SELECT s.id, s.org_id, s.stock_item_id, si.name AS stock_item_name,
                   s.sold_by, COALESCE(u.full_name, u.username) AS sold_by_name,
                   s.quantity, s.total_price, s.sale_date
            FROM sales s
            LEFT JOIN stock_items si ON si.id = s.stock_item_id
            LEFT JOIN users u ON u.id = s.sold_by
            WHERE s.org_id = $1
            ORDER BY s.sale_date DESC
            "#,
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sales)
    }
}
