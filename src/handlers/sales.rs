// src/handlers/sales.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::RequestedOrg},
    models::sales::{RecordSalePayload, Sale, SaleView},
};

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    request_body = RecordSalePayload,
    responses(
        (status = 201, description = "Sale recorded and stock deducted", body = Sale),
        (status = 404, description = "Stock item not found"),
        (status = 409, description = "Insufficient stock")
    ),
    params(("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")),
    security(("api_jwt" = []))
)]
pub async fn record_sale(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
    AppJson(payload): AppJson<RecordSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let sale = app_state.ledger_service.record_sale(&actor, org, &payload).await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    responses(
        (status = 200, description = "Sales, newest first", body = [SaleView]),
        (status = 403, description = "No sales permission")
    ),
    params(("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
) -> Result<Json<Vec<SaleView>>, AppError> {
    let sales = app_state.ledger_service.list_sales(&actor, org).await?;
    Ok(Json(sales))
}
