// src/models/analytics.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Immutable loss row. cost_at_loss is the item's cost_price frozen at report time.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Loss {
    pub id: Uuid,
    pub org_id: Uuid,
    pub stock_item_id: Option<Uuid>,
    pub quantity: i32,
    pub cost_at_loss: Decimal,
    pub reason: String,
    pub notes: Option<String>,
    pub reported_by: Option<Uuid>,
    pub loss_date: DateTime<Utc>,
}

/// Loss history entry, as shown on the profit & loss dashboard.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LossView {
    pub id: Uuid,
    pub item_name: Option<String>,
    pub quantity: i32,
    pub cost_at_loss: Decimal,
    pub total_loss: Decimal,
    pub reason: String,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub reported_by: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordLossPayload {
    pub stock_item_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1."))]
    pub quantity: i32,
    /// Free text, e.g. "Damaged", "Stolen", "Expired".
    #[validate(length(min = 1, max = 50, message = "Reason is required."))]
    pub reason: String,
    pub notes: Option<String>,
}

/// Raw ledger totals for one organization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct LedgerTotals {
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub losses: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub gross_profit: Decimal,
    pub losses: Decimal,
    pub net_profit: Decimal,
}
