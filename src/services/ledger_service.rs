// src/services/ledger_service.rs

//! Sale and loss recording.
//!
//! Each recorder locks the stock row, checks availability, decrements the
//! quantity and appends the ledger row inside one transaction. Dropping the
//! transaction on any error rolls back the deduction with it.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AnalyticsRepository, InventoryRepository, SalesRepository},
    models::{
        analytics::{Loss, RecordLossPayload},
        auth::Actor,
        sales::{RecordSalePayload, Sale, SaleView},
    },
    services::policy::{authorize_in, Operation},
};

/// Fails with `InsufficientStock` when `requested` exceeds `available`.
pub fn check_available(available: i32, requested: i32) -> Result<(), AppError> {
    if requested > available {
        return Err(AppError::InsufficientStock { available, requested });
    }
    Ok(())
}

/// Total captured on the sale row: unit price at this instant times quantity.
pub fn sale_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

#[derive(Clone)]
pub struct LedgerService {
    inventory_repo: InventoryRepository,
    sales_repo: SalesRepository,
    analytics_repo: AnalyticsRepository,
    pool: PgPool,
}

impl LedgerService {
    pub fn new(
        inventory_repo: InventoryRepository,
        sales_repo: SalesRepository,
        analytics_repo: AnalyticsRepository,
        pool: PgPool,
    ) -> Self {
        Self { inventory_repo, sales_repo, analytics_repo, pool }
    }

    pub async fn record_sale(
        &self,
        actor: &Actor,
        requested_org: Option<Uuid>,
        payload: &RecordSalePayload,
    ) -> Result<Sale, AppError> {
        let org_id = authorize_in(actor, Operation::Sales, requested_org)?;

        let mut tx = self.pool.begin().await?;

        let item = self
            .inventory_repo
            .lock_item(&mut *tx, payload.stock_item_id, org_id)
            .await?
            .ok_or(AppError::NotFound("Stock item"))?;

        check_available(item.quantity, payload.quantity)?;

        let deducted = self
            .inventory_repo
            .deduct_quantity(&mut *tx, payload.stock_item_id, payload.quantity)
            .await?;
        if !deducted {
            return Err(AppError::InsufficientStock { available: item.quantity, requested: payload.quantity });
        }

        let sale = self
            .sales_repo
            .insert_sale(
                &mut *tx,
                org_id,
                payload.stock_item_id,
                actor.id,
                payload.quantity,
                sale_total(item.price, payload.quantity),
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            sale_id = %sale.id,
            item_id = %payload.stock_item_id,
            quantity = payload.quantity,
            total = %sale.total_price,
            "sale recorded"
        );
        Ok(sale)
    }

    pub async fn list_sales(&self, actor: &Actor, requested_org: Option<Uuid>) -> Result<Vec<SaleView>, AppError> {
        let org_id = authorize_in(actor, Operation::Sales, requested_org)?;
        self.sales_repo.list_sales(org_id).await
    }

    /// Records a write-off. The item's cost price is frozen onto the loss row.
    pub async fn record_loss(
        &self,
        actor: &Actor,
        requested_org: Option<Uuid>,
        payload: &RecordLossPayload,
    ) -> Result<Loss, AppError> {
        let org_id = authorize_in(actor, Operation::StockWrite, requested_org)?;

        let mut tx = self.pool.begin().await?;

        let item = self
            .inventory_repo
            .lock_item(&mut *tx, payload.stock_item_id, org_id)
            .await?
            .ok_or(AppError::NotFound("Stock item"))?;

        check_available(item.quantity, payload.quantity)?;

        let deducted = self
            .inventory_repo
            .deduct_quantity(&mut *tx, payload.stock_item_id, payload.quantity)
            .await?;
        if !deducted {
            return Err(AppError::InsufficientStock { available: item.quantity, requested: payload.quantity });
        }

        let loss = self
            .analytics_repo
            .insert_loss(&mut *tx, org_id, actor.id, payload, item.cost_price)
            .await?;

        tx.commit().await?;

        tracing::info!(
            loss_id = %loss.id,
            item_id = %payload.stock_item_id,
            quantity = payload.quantity,
            reason = %loss.reason,
            "loss recorded"
        );
        Ok(loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ErrorKind;
    use rust_decimal_macros::dec;

    #[test]
    fn sale_total_captures_price_times_quantity() {
        assert_eq!(sale_total(dec!(20.0), 3), dec!(60.0));
    }

    #[test]
    fn loss_value_uses_cost_price() {
        // 2 units at cost 15 are displayed as 30.
        assert_eq!(sale_total(dec!(15.0), 2), dec!(30.0));
    }

    #[test]
    fn requesting_all_remaining_stock_is_allowed() {
        assert!(check_available(10, 10).is_ok());
        assert!(check_available(10, 3).is_ok());
    }

    #[test]
    fn requesting_more_than_available_fails() {
        let err = check_available(2, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientStock);
        assert!(matches!(err, AppError::InsufficientStock { available: 2, requested: 3 }));
    }
}
