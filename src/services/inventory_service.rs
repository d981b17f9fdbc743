// src/services/inventory_service.rs

use uuid::Uuid;

use crate::{
    common::{db_utils::expect_affected, error::AppError},
    db::InventoryRepository,
    models::{
        auth::Actor,
        inventory::{CreateStockItemPayload, StockItem, StockItemView, StockStatus, UpdateStockItemPayload},
    },
    services::policy::{authorize_in, Operation},
};

/// Percentage of capacity at or above which an item counts as well stocked.
const HIGH_WATERMARK_PERCENT: i64 = 80;

/// Derives the stock level of an item. Never persisted; recomputed on each read.
///
/// At or below the minimum threshold is `Low`. Otherwise, filling at least
/// 80% of capacity is `High`. A non-positive capacity counts as full.
pub fn classify_status(quantity: i32, min_threshold: i32, max_capacity: i32) -> StockStatus {
    if quantity <= min_threshold {
        return StockStatus::Low;
    }
    // quantity / max * 100 >= 80, without division.
    if i64::from(quantity) * 100 >= HIGH_WATERMARK_PERCENT * i64::from(max_capacity) {
        StockStatus::High
    } else {
        StockStatus::Medium
    }
}

impl From<StockItem> for StockItemView {
    fn from(item: StockItem) -> Self {
        let status = classify_status(item.quantity, item.min_threshold, item.max_capacity);
        StockItemView { item, status }
    }
}

#[derive(Clone)]
pub struct InventoryService {
    repo: InventoryRepository,
}

impl InventoryService {
    pub fn new(repo: InventoryRepository) -> Self {
        Self { repo }
    }

    pub async fn create_item(
        &self,
        actor: &Actor,
        requested_org: Option<Uuid>,
        payload: &CreateStockItemPayload,
    ) -> Result<StockItemView, AppError> {
        let org_id = authorize_in(actor, Operation::StockWrite, requested_org)?;
        let item = self.repo.create_item(org_id, payload).await?;
        tracing::info!(item_id = %item.id, org_id = %org_id, "stock item created");
        Ok(item.into())
    }

    pub async fn list_items(&self, actor: &Actor, requested_org: Option<Uuid>) -> Result<Vec<StockItemView>, AppError> {
        let org_id = authorize_in(actor, Operation::StockRead, requested_org)?;
        let items = self.repo.list_items(org_id).await?;
        Ok(items.into_iter().map(StockItemView::from).collect())
    }

    pub async fn update_item(
        &self,
        actor: &Actor,
        requested_org: Option<Uuid>,
        id: Uuid,
        payload: &UpdateStockItemPayload,
    ) -> Result<StockItemView, AppError> {
        let org_id = authorize_in(actor, Operation::StockWrite, requested_org)?;
        if payload.is_empty() {
            return Err(AppError::InvalidInput("No fields to update".into()));
        }
        let item = self
            .repo
            .update_item(id, org_id, payload)
            .await?
            .ok_or(AppError::NotFound("Stock item"))?;
        Ok(item.into())
    }

    pub async fn delete_item(&self, actor: &Actor, requested_org: Option<Uuid>, id: Uuid) -> Result<(), AppError> {
        let org_id = authorize_in(actor, Operation::StockWrite, requested_org)?;
        let removed = self.repo.delete_item(id, org_id).await?;
        expect_affected(removed, "Stock item")?;
        tracing::info!(item_id = %id, org_id = %org_id, "stock item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn below_threshold_is_low() {
        assert_eq!(classify_status(5, 10, 100), StockStatus::Low);
    }

    #[test]
    fn threshold_itself_is_low() {
        assert_eq!(classify_status(10, 10, 100), StockStatus::Low);
    }

    #[test]
    fn eighty_five_percent_is_high() {
        assert_eq!(classify_status(85, 10, 100), StockStatus::High);
    }

    #[test]
    fn exactly_eighty_percent_is_high() {
        assert_eq!(classify_status(80, 10, 100), StockStatus::High);
        assert_eq!(classify_status(79, 10, 100), StockStatus::Medium);
    }

    #[test]
    fn half_full_is_medium() {
        assert_eq!(classify_status(50, 10, 100), StockStatus::Medium);
    }

    #[test]
    fn zero_capacity_does_not_divide() {
        assert_eq!(classify_status(1, 0, 0), StockStatus::High);
    }

    proptest! {
        #[test]
        fn low_exactly_when_at_or_below_threshold(q in 0..10_000i32, min in 0..10_000i32, max in 1..10_000i32) {
            let status = classify_status(q, min, max);
            prop_assert_eq!(status == StockStatus::Low, q <= min);
        }

        #[test]
        fn never_overflows_at_extremes(q in any::<i32>(), min in any::<i32>(), max in any::<i32>()) {
            let _ = classify_status(q, min, max);
        }
    }
}
