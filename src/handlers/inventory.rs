// src/handlers/inventory.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, extract::{AppJson, AppPath}},
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::RequestedOrg},
    models::inventory::{CreateStockItemPayload, StockItemView, UpdateStockItemPayload},
};

// POST /api/stock
#[utoipa::path(
    post,
    path = "/api/stock",
    tag = "Stock",
    request_body = CreateStockItemPayload,
    responses(
        (status = 201, description = "Stock item created", body = StockItemView),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "No stock write permission")
    ),
    params(("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")),
    security(("api_jwt" = []))
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
    AppJson(payload): AppJson<CreateStockItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state.inventory_service.create_item(&actor, org, &payload).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

// GET /api/stock
#[utoipa::path(
    get,
    path = "/api/stock",
    tag = "Stock",
    responses(
        (status = 200, description = "Stock items with computed status, newest first", body = [StockItemView]),
        (status = 403, description = "No stock read permission")
    ),
    params(("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")),
    security(("api_jwt" = []))
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
) -> Result<Json<Vec<StockItemView>>, AppError> {
    let items = app_state.inventory_service.list_items(&actor, org).await?;
    Ok(Json(items))
}

// PATCH /api/stock/{id}
#[utoipa::path(
    patch,
    path = "/api/stock/{id}",
    tag = "Stock",
    request_body = UpdateStockItemPayload,
    responses(
        (status = 200, description = "Stock item updated", body = StockItemView),
        (status = 400, description = "Invalid or empty payload"),
        (status = 404, description = "Stock item not found")
    ),
    params(
        ("id" = Uuid, Path, description = "Stock item id"),
        ("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateStockItemPayload>,
) -> Result<Json<StockItemView>, AppError> {
    payload.validate()?;

    let item = app_state.inventory_service.update_item(&actor, org, id, &payload).await?;
    Ok(Json(item))
}

// DELETE /api/stock/{id}
#[utoipa::path(
    delete,
    path = "/api/stock/{id}",
    tag = "Stock",
    responses(
        (status = 204, description = "Stock item deleted"),
        (status = 404, description = "Stock item not found")
    ),
    params(
        ("id" = Uuid, Path, description = "Stock item id"),
        ("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.inventory_service.delete_item(&actor, org, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
