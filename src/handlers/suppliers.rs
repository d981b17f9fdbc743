// src/handlers/suppliers.rs

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
    models::suppliers::{
        CreateShipmentPayload, CreateSupplierPayload, RateShipmentPayload, ShipmentView, Supplier,
        UpdateShipmentStatusPayload,
    },
};

// POST /api/suppliers
#[utoipa::path(
    post,
    path = "/api/suppliers",
    tag = "Suppliers",
    request_body = CreateSupplierPayload,
    responses(
        (status = 201, description = "Supplier created", body = Supplier),
        (status = 400, description = "Invalid payload")
    ),
    params(("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
    AppJson(payload): AppJson<CreateSupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let supplier = app_state.supplier_service.create_supplier(&actor, org, &payload).await?;

    Ok((StatusCode::CREATED, Json(supplier)))
}

// GET /api/suppliers
#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Suppliers",
    responses((status = 200, description = "Suppliers by name", body = [Supplier])),
    params(("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")),
    security(("api_jwt" = []))
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
) -> Result<Json<Vec<Supplier>>, AppError> {
    let suppliers = app_state.supplier_service.list_suppliers(&actor, org).await?;
    Ok(Json(suppliers))
}

// POST /api/shipments
#[utoipa::path(
    post,
    path = "/api/shipments",
    tag = "Suppliers",
    request_body = CreateShipmentPayload,
    responses(
        (status = 201, description = "Shipment created as Pending", body = ShipmentView),
        (status = 404, description = "Supplier not found")
    ),
    params(("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")),
    security(("api_jwt" = []))
)]
pub async fn create_shipment(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
    AppJson(payload): AppJson<CreateShipmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let shipment = app_state.supplier_service.create_shipment(&actor, org, &payload).await?;

    Ok((StatusCode::CREATED, Json(shipment)))
}

// GET /api/shipments
#[utoipa::path(
    get,
    path = "/api/shipments",
    tag = "Suppliers",
    responses((status = 200, description = "Shipments by expected date", body = [ShipmentView])),
    params(("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")),
    security(("api_jwt" = []))
)]
pub async fn list_shipments(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
) -> Result<Json<Vec<ShipmentView>>, AppError> {
    let shipments = app_state.supplier_service.list_shipments(&actor, org).await?;
    Ok(Json(shipments))
}

// PATCH /api/shipments/{id}/status
#[utoipa::path(
    patch,
    path = "/api/shipments/{id}/status",
    tag = "Suppliers",
    request_body = UpdateShipmentStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = ShipmentView),
        (status = 404, description = "Shipment not found")
    ),
    params(
        ("id" = Uuid, Path, description = "Shipment id"),
        ("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_shipment_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateShipmentStatusPayload>,
) -> Result<Json<ShipmentView>, AppError> {
    let shipment = app_state.supplier_service.update_status(&actor, org, id, &payload).await?;
    Ok(Json(shipment))
}

// POST /api/shipments/{id}/rate
#[utoipa::path(
    post,
    path = "/api/shipments/{id}/rate",
    tag = "Suppliers",
    request_body = RateShipmentPayload,
    responses(
        (status = 200, description = "Shipment scored and marked Arrived", body = ShipmentView),
        (status = 403, description = "Owners and admins only"),
        (status = 404, description = "Shipment not found")
    ),
    params(
        ("id" = Uuid, Path, description = "Shipment id"),
        ("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")
    ),
    security(("api_jwt" = []))
)]
pub async fn rate_shipment(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<RateShipmentPayload>,
) -> Result<Json<ShipmentView>, AppError> {
    payload.validate()?;

    let shipment = app_state.supplier_service.rate_shipment(&actor, org, id, &payload).await?;
    Ok(Json(shipment))
}
