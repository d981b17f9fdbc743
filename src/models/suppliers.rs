// src/models/suppliers.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "shipment_status")]
pub enum ShipmentStatus {
    Pending,
    Arrived,
    Late,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,
    pub org_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shipment joined with its supplier's name. Receipt fields stay null until
/// the shipment is rated (or a received date is set with a status update).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentView {
    pub id: Uuid,
    pub org_id: Uuid,
    pub supplier_id: Uuid,
    pub supplier_name: Option<String>,
    pub expected_quantity: i32,
    pub expected_date: NaiveDate,
    pub status: ShipmentStatus,
    pub received_quantity: Option<i32>,
    pub damaged_quantity: Option<i32>,
    pub received_date: Option<NaiveDate>,
    pub score: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSupplierPayload {
    #[validate(length(min = 1, max = 255, message = "Supplier name is required."))]
    pub name: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email address."))]
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentPayload {
    pub supplier_id: Uuid,
    #[validate(range(min = 0, message = "Expected quantity cannot be negative."))]
    pub expected_quantity: i32,
    pub expected_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShipmentStatusPayload {
    pub status: ShipmentStatus,
    pub received_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateShipmentPayload {
    #[validate(range(min = 0, message = "Received quantity cannot be negative."))]
    pub received_quantity: i32,
    #[validate(range(min = 0, message = "Damaged quantity cannot be negative."))]
    pub damaged_quantity: i32,
    pub received_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_capitalized_wire_names() {
        assert_eq!(serde_json::to_string(&ShipmentStatus::Arrived).unwrap(), "\"Arrived\"");
        let payload: UpdateShipmentStatusPayload =
            serde_json::from_str(r#"{"status":"Late"}"#).unwrap();
        assert_eq!(payload.status, ShipmentStatus::Late);
        assert!(payload.received_date.is_none());
    }
}
