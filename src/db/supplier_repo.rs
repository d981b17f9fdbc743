// src/db/supplier_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::suppliers::{CreateShipmentPayload, CreateSupplierPayload, ShipmentStatus, ShipmentView, Supplier},
};

const SHIPMENT_VIEW_COLUMNS: &str = r#"
    sh.id, sh.org_id, sh.supplier_id, sp.name AS supplier_name, sh.expected_quantity,
    sh.expected_date, sh.status, sh.received_quantity, sh.damaged_quantity,
    sh.received_date, sh.score, sh.notes, sh.created_at, sh.updated_at
"#;

/// Quantity fields a rating needs from a locked shipment.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct LockedShipment {
    pub expected_quantity: i32,
    pub score: Option<f64>,
}

#[derive(Clone)]
pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_supplier(&self, org_id: Uuid, payload: &CreateSupplierPayload) -> Result<Supplier, AppError> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (org_id, name, phone, email, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, org_id, name, phone, email, address, created_at, updated_at
            "#,
        )
        .bind(org_id)
        .bind(&payload.name)
        .bind(payload.phone.as_deref())
        .bind(payload.email.as_deref())
        .bind(payload.address.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(supplier)
    }

    pub async fn list_suppliers(&self, org_id: Uuid) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, org_id, name, phone, email, address, created_at, updated_at
            FROM suppliers
            WHERE org_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(suppliers)
    }

    pub async fn supplier_in_org(&self, supplier_id: Uuid, org_id: Uuid) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM suppliers WHERE id = $1 AND org_id = $2)")
                .bind(supplier_id)
                .bind(org_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn create_shipment(&self, org_id: Uuid, payload: &CreateShipmentPayload) -> Result<ShipmentView, AppError> {
        let query = format!(
            r#"
            WITH sh AS (
                INSERT INTO shipments (org_id, supplier_id, expected_quantity, expected_date, notes)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT {SHIPMENT_VIEW_COLUMNS}
            FROM sh
            LEFT JOIN suppliers sp ON sp.id = sh.supplier_id
            "#
        );
        let shipment = sqlx::query_as::<_, ShipmentView>(&query)
            .bind(org_id)
            .bind(payload.supplier_id)
            .bind(payload.expected_quantity)
            .bind(payload.expected_date)
            .bind(payload.notes.as_deref())
            .fetch_one(&self.pool)
            .await?;
        Ok(shipment)
    }

    /// Shipments of one organization ordered by expected date.
    pub async fn list_shipments(&self, org_id: Uuid) -> Result<Vec<ShipmentView>, AppError> {
        let query = format!(
            r#"
            SELECT {SHIPMENT_VIEW_COLUMNS}
            FROM shipments sh
            LEFT JOIN suppliers sp ON sp.id = sh.supplier_id
            WHERE sh.org_id = $1
            ORDER BY sh.expected_date ASC
            "#
        );
        let shipments = sqlx::query_as::<_, ShipmentView>(&query)
            .bind(org_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(shipments)
    }

    pub async fn find_shipment<'e, E>(&self, executor: E, id: Uuid, org_id: Uuid) -> Result<Option<ShipmentView>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            r#"
            SELECT {SHIPMENT_VIEW_COLUMNS}
            FROM shipments sh
            LEFT JOIN suppliers sp ON sp.id = sh.supplier_id
            WHERE sh.id = $1 AND sh.org_id = $2
            "#
        );
        let shipment = sqlx::query_as::<_, ShipmentView>(&query)
            .bind(id)
            .bind(org_id)
            .fetch_optional(executor)
            .await?;
        Ok(shipment)
    }

    /// Sets the status; a supplied received date overwrites, an absent one keeps the stored value.
    pub async fn update_status(
        &self,
        id: Uuid,
        org_id: Uuid,
        status: ShipmentStatus,
        received_date: Option<NaiveDate>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE shipments
            SET status = $3, received_date = COALESCE($4, received_date), updated_at = NOW()
            WHERE id = $1 AND org_id = $2
            "#,
        )
        .bind(id)
        .bind(org_id)
        .bind(status)
        .bind(received_date)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn lock_shipment<'e, E>(&self, executor: E, id: Uuid, org_id: Uuid) -> Result<Option<LockedShipment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let shipment = sqlx::query_as::<_, LockedShipment>(
            "SELECT expected_quantity, score FROM shipments WHERE id = $1 AND org_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(org_id)
        .fetch_optional(executor)
        .await?;
        Ok(shipment)
    }

    /// Stores the receipt figures and score and marks the shipment Arrived.
    /// The received date defaults to today.
    pub async fn apply_rating<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        received_quantity: i32,
        damaged_quantity: i32,
        received_date: Option<NaiveDate>,
        score: f64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE shipments
            SET status = 'Arrived',
                received_quantity = $2,
                damaged_quantity = $3,
                received_date = COALESCE($4, CURRENT_DATE),
                score = $5,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(received_quantity)
        .bind(damaged_quantity)
        .bind(received_date)
        .bind(score)
        .execute(executor)
        .await?;
        Ok(())
    }
}
