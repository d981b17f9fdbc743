// src/services/supplier_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::expect_affected, error::AppError},
    db::SupplierRepository,
    models::{
        auth::Actor,
        suppliers::{
            CreateShipmentPayload, CreateSupplierPayload, RateShipmentPayload, ShipmentView,
            Supplier, UpdateShipmentStatusPayload,
        },
    },
    services::policy::{authorize_in, Operation},
};

/// Shipment performance in 0..=100: undamaged units received over units expected.
///
/// An expected quantity of zero scores 0.
pub fn compute_score(expected: i32, received: i32, damaged: i32) -> f64 {
    if expected <= 0 {
        return 0.0;
    }
    let good = (i64::from(received) - i64::from(damaged)).max(0) as f64;
    (good / f64::from(expected) * 100.0).min(100.0)
}

#[derive(Clone)]
pub struct SupplierService {
    repo: SupplierRepository,
    pool: PgPool,
}

impl SupplierService {
    pub fn new(repo: SupplierRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create_supplier(
        &self,
        actor: &Actor,
        requested_org: Option<Uuid>,
        payload: &CreateSupplierPayload,
    ) -> Result<Supplier, AppError> {
        let org_id = authorize_in(actor, Operation::Shipments, requested_org)?;
        let supplier = self.repo.create_supplier(org_id, payload).await?;
        tracing::info!(supplier_id = %supplier.id, org_id = %org_id, "supplier created");
        Ok(supplier)
    }

    pub async fn list_suppliers(&self, actor: &Actor, requested_org: Option<Uuid>) -> Result<Vec<Supplier>, AppError> {
        let org_id = authorize_in(actor, Operation::Shipments, requested_org)?;
        self.repo.list_suppliers(org_id).await
    }

    pub async fn create_shipment(
        &self,
        actor: &Actor,
        requested_org: Option<Uuid>,
        payload: &CreateShipmentPayload,
    ) -> Result<ShipmentView, AppError> {
        let org_id = authorize_in(actor, Operation::Shipments, requested_org)?;
        if !self.repo.supplier_in_org(payload.supplier_id, org_id).await? {
            return Err(AppError::NotFound("Supplier"));
        }
        let shipment = self.repo.create_shipment(org_id, payload).await?;
        tracing::info!(shipment_id = %shipment.id, supplier_id = %payload.supplier_id, "shipment created");
        Ok(shipment)
    }

    pub async fn list_shipments(&self, actor: &Actor, requested_org: Option<Uuid>) -> Result<Vec<ShipmentView>, AppError> {
        let org_id = authorize_in(actor, Operation::Shipments, requested_org)?;
        self.repo.list_shipments(org_id).await
    }

    pub async fn update_status(
        &self,
        actor: &Actor,
        requested_org: Option<Uuid>,
        id: Uuid,
        payload: &UpdateShipmentStatusPayload,
    ) -> Result<ShipmentView, AppError> {
        let org_id = authorize_in(actor, Operation::Shipments, requested_org)?;
        let updated = self
            .repo
            .update_status(id, org_id, payload.status, payload.received_date)
            .await?;
        expect_affected(updated, "Shipment")?;

        self.repo
            .find_shipment(&self.pool, id, org_id)
            .await?
            .ok_or(AppError::NotFound("Shipment"))
    }

    /// Records receipt figures, scores the shipment and marks it Arrived.
    /// Rating an already rated shipment overwrites the previous figures.
    pub async fn rate_shipment(
        &self,
        actor: &Actor,
        requested_org: Option<Uuid>,
        id: Uuid,
        payload: &RateShipmentPayload,
    ) -> Result<ShipmentView, AppError> {
        let org_id = authorize_in(actor, Operation::RateShipment, requested_org)?;

        let mut tx = self.pool.begin().await?;

        let shipment = self
            .repo
            .lock_shipment(&mut *tx, id, org_id)
            .await?
            .ok_or(AppError::NotFound("Shipment"))?;

        if let Some(previous) = shipment.score {
            tracing::warn!(shipment_id = %id, previous_score = previous, "re-rating shipment");
        }

        let score = compute_score(shipment.expected_quantity, payload.received_quantity, payload.damaged_quantity);

        self.repo
            .apply_rating(
                &mut *tx,
                id,
                payload.received_quantity,
                payload.damaged_quantity,
                payload.received_date,
                score,
            )
            .await?;

        let rated = self
            .repo
            .find_shipment(&mut *tx, id, org_id)
            .await?
            .ok_or(AppError::NotFound("Shipment"))?;

        tx.commit().await?;

        tracing::info!(shipment_id = %id, score, "shipment rated");
        Ok(rated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn damaged_units_do_not_count() {
        assert_eq!(compute_score(100, 90, 10), 80.0);
    }

    #[test]
    fn zero_expected_scores_zero() {
        assert_eq!(compute_score(0, 5, 0), 0.0);
    }

    #[test]
    fn more_damaged_than_received_scores_zero() {
        assert_eq!(compute_score(10, 3, 7), 0.0);
    }

    #[test]
    fn over_delivery_is_capped() {
        assert_eq!(compute_score(10, 25, 0), 100.0);
    }

    proptest! {
        #[test]
        fn score_is_always_within_bounds(
            expected in any::<i32>(),
            received in any::<i32>(),
            damaged in any::<i32>(),
        ) {
            let score = compute_score(expected, received, damaged);
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }
}
