// src/models/sales.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Immutable ledger row. total_price is captured at the moment of sale.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub org_id: Uuid,
    pub stock_item_id: Option<Uuid>,
    pub sold_by: Option<Uuid>,
    pub quantity: i32,
    pub total_price: Decimal,
    pub sale_date: DateTime<Utc>,
}

/// Sale enriched with item and seller names for listings.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleView {
    pub id: Uuid,
    pub org_id: Uuid,
    pub stock_item_id: Option<Uuid>,
    pub stock_item_name: Option<String>,
    pub sold_by: Option<Uuid>,
    pub sold_by_name: Option<String>,
    pub quantity: i32,
    pub total_price: Decimal,
    pub sale_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordSalePayload {
    pub stock_item_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1."))]
    pub quantity: i32,
}
