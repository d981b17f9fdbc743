// src/db/analytics_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::analytics::{LedgerTotals, Loss, LossView, RecordLossPayload},
};

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_loss<'e, E>(
        &self,
        executor: E,
        org_id: Uuid,
        reported_by: Uuid,
        payload: &RecordLossPayload,
        cost_at_loss: rust_decimal::Decimal,
    ) -> Result<Loss, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let loss = sqlx::query_as::<_, Loss>(
            r#"
            INSERT INTO losses (org_id, stock_item_id, quantity, cost_at_loss, reason, notes, reported_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, org_id, stock_item_id, quantity, cost_at_loss, reason, notes, reported_by, loss_date
            "#,
        )
        .bind(org_id)
        .bind(payload.stock_item_id)
        .bind(payload.quantity)
        .bind(cost_at_loss)
        .bind(&payload.reason)
        .bind(payload.notes.as_deref())
        .bind(reported_by)
        .fetch_one(executor)
        .await?;
        Ok(loss)
    }

    /// Loss history, newest first.
    pub async fn list_losses(&self, org_id: Uuid) -> Result<Vec<LossView>, AppError> {
        let losses = sqlx::query_as::<_, LossView>(
            r#"
            SELECT l.id, si.name AS item_name, l.quantity, l.cost_at_loss,
                   (l.quantity * l.cost_at_loss) AS total_loss,
                   l.reason, l.notes, l.loss_date AS date,
                   COALESCE(u.full_name, u.username) AS reported_by
            FROM losses l
            LEFT JOIN stock_items si ON si.id = l.stock_item_id
            LEFT JOIN users u ON u.id = l.reported_by
            WHERE l.org_id = $1
            ORDER BY l.loss_date DESC
            "#,
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(losses)
    }

    /// Revenue, cost of goods sold and loss value, read from one snapshot.
    ///
    /// COGS uses each item's current cost price; losses use the cost frozen
    /// on the loss row.
    pub async fn ledger_totals(&self, org_id: Uuid) -> Result<LedgerTotals, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let totals = sqlx::query_as::<_, LedgerTotals>(
            r#"
            SELECT
                (SELECT COALESCE(SUM(s.total_price), 0)
                   FROM sales s WHERE s.org_id = $1) AS revenue,
                (SELECT COALESCE(SUM(s.quantity * si.cost_price), 0)
                   FROM sales s JOIN stock_items si ON si.id = s.stock_item_id
                   WHERE s.org_id = $1) AS cogs,
                (SELECT COALESCE(SUM(l.quantity * l.cost_at_loss), 0)
                   FROM losses l WHERE l.org_id = $1) AS losses
            "#,
        )
        .bind(org_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(totals)
    }
}
