// src/handlers/analytics.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::RequestedOrg},
    models::analytics::{AnalyticsSummary, Loss, LossView, RecordLossPayload},
};

// GET /api/analytics/summary
#[utoipa::path(
    get,
    path = "/api/analytics/summary",
    tag = "Analytics",
    responses(
        (status = 200, description = "Revenue, COGS, losses and profit", body = AnalyticsSummary),
        (status = 403, description = "Owners and admins only")
    ),
    params(("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let summary = app_state.analytics_service.summary(&actor, org).await?;
    Ok(Json(summary))
}

// POST /api/analytics/loss
#[utoipa::path(
    post,
    path = "/api/analytics/loss",
    tag = "Analytics",
    request_body = RecordLossPayload,
    responses(
        (status = 201, description = "Loss recorded and stock deducted", body = Loss),
        (status = 403, description = "No stock write permission"),
        (status = 404, description = "Stock item not found"),
        (status = 409, description = "Insufficient stock")
    ),
    params(("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")),
    security(("api_jwt" = []))
)]
pub async fn record_loss(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
    AppJson(payload): AppJson<RecordLossPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let loss = app_state.ledger_service.record_loss(&actor, org, &payload).await?;

    Ok((StatusCode::CREATED, Json(loss)))
}

// GET /api/analytics/losses
#[utoipa::path(
    get,
    path = "/api/analytics/losses",
    tag = "Analytics",
    responses(
        (status = 200, description = "Loss history, newest first", body = [LossView]),
        (status = 403, description = "Owners and admins only")
    ),
    params(("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")),
    security(("api_jwt" = []))
)]
pub async fn list_losses(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
) -> Result<Json<Vec<LossView>>, AppError> {
    let losses = app_state.analytics_service.loss_history(&actor, org).await?;
    Ok(Json(losses))
}
