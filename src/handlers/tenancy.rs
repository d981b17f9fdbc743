// src/handlers/tenancy.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::tenancy::{CreateOrganizationPayload, Organization},
};

// POST /api/organizations
#[utoipa::path(
    post,
    path = "/api/organizations",
    tag = "Organizations",
    request_body = CreateOrganizationPayload,
    responses(
        (status = 201, description = "Organization created", body = Organization),
        (status = 403, description = "Owners only")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_organization(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    AppJson(payload): AppJson<CreateOrganizationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let org = app_state
        .tenant_service
        .create_organization(&actor, payload.name.trim())
        .await?;

    Ok((StatusCode::CREATED, Json(org)))
}

// GET /api/organizations
#[utoipa::path(
    get,
    path = "/api/organizations",
    tag = "Organizations",
    responses(
        (status = 200, description = "Organizations visible to the caller", body = [Organization])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_organizations(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
) -> Result<Json<Vec<Organization>>, AppError> {
    let orgs = app_state.tenant_service.list_organizations(&actor).await?;
    Ok(Json(orgs))
}
