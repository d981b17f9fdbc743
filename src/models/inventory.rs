// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Stock level classification (never persisted) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Low,
    Medium,
    High,
}

// --- Stock item row ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: Uuid,
    pub org_id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub min_threshold: i32,
    pub max_capacity: i32,
    pub price: Decimal,
    pub cost_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stock item plus its derived status.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockItemView {
    #[serde(flatten)]
    pub item: StockItem,
    pub status: StockStatus,
}

// --- Payloads ---

pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some("Value cannot be negative.".into());
        return Err(err);
    }
    Ok(())
}

fn default_min_threshold() -> i32 {
    10
}

fn default_max_capacity() -> i32 {
    100
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockItemPayload {
    #[validate(length(min = 1, max = 100, message = "Name is required."))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Category is required."))]
    pub category: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "Quantity cannot be negative."))]
    pub quantity: i32,

    #[serde(default = "default_min_threshold")]
    #[validate(range(min = 0, message = "Minimum threshold cannot be negative."))]
    pub min_threshold: i32,

    #[serde(default = "default_max_capacity")]
    #[validate(range(min = 1, message = "Maximum capacity must be positive."))]
    pub max_capacity: i32,

    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub cost_price: Decimal,
}

/// Partial update: only supplied fields change.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockItemPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Quantity cannot be negative."))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0))]
    pub min_threshold: Option<i32>,
    #[validate(range(min = 1))]
    pub max_capacity: Option<i32>,
    #[validate(custom(function = "validate_not_negative"))]
    pub price: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub cost_price: Option<Decimal>,
}

impl UpdateStockItemPayload {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.quantity.is_none()
            && self.min_threshold.is_none()
            && self.max_capacity.is_none()
            && self.price.is_none()
            && self.cost_price.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn create_payload_applies_defaults() {
        let payload: CreateStockItemPayload =
            serde_json::from_str(r#"{"name":"Rice","category":"Food"}"#).unwrap();
        assert_eq!(payload.quantity, 0);
        assert_eq!(payload.min_threshold, 10);
        assert_eq!(payload.max_capacity, 100);
        assert_eq!(payload.price, Decimal::ZERO);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn negative_price_is_rejected() {
        let payload = UpdateStockItemPayload { price: Some(dec!(-1.5)), ..Default::default() };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(UpdateStockItemPayload::default().is_empty());
        let payload = UpdateStockItemPayload { quantity: Some(3), ..Default::default() };
        assert!(!payload.is_empty());
    }

    #[test]
    fn view_flattens_item_and_adds_status() {
        let now = Utc::now();
        let view = StockItemView {
            item: StockItem {
                id: Uuid::nil(),
                org_id: Uuid::nil(),
                name: "Rice".into(),
                category: "Food".into(),
                quantity: 5,
                min_threshold: 10,
                max_capacity: 100,
                price: dec!(2.50),
                cost_price: dec!(1.00),
                created_at: now,
                updated_at: now,
            },
            status: StockStatus::Low,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "low");
        assert_eq!(json["minThreshold"], 10);
        assert_eq!(json["costPrice"], 1.0);
    }
}
