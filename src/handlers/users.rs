// src/handlers/users.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, extract::{AppJson, AppPath, AppQuery}},
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::RequestedOrg},
    models::auth::{CreateUserPayload, UpdateDepartmentPayload, UserListQuery, UserView},
};

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "User created", body = UserView),
        (status = 403, description = "Role not allowed to create this user"),
        (status = 409, description = "Username or email already registered")
    ),
    params(("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
    AppJson(payload): AppJson<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state.user_service.create_org_user(&actor, org, &payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Users of the organization", body = [UserView]),
        (status = 403, description = "Owners and admins only")
    ),
    params(
        ("role" = Option<String>, Query, description = "owner, admin or employee"),
        ("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
    AppQuery(query): AppQuery<UserListQuery>,
) -> Result<Json<Vec<UserView>>, AppError> {
    let users = app_state.user_service.list_users(&actor, org, query.role).await?;
    Ok(Json(users))
}

// DELETE /api/users/{id}
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Role not allowed to delete this user"),
        (status = 404, description = "User not found")
    ),
    params(
        ("id" = Uuid, Path, description = "User id"),
        ("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.user_service.delete_user(&actor, org, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// PATCH /api/users/{id}/department
#[utoipa::path(
    patch,
    path = "/api/users/{id}/department",
    tag = "Users",
    request_body = UpdateDepartmentPayload,
    responses(
        (status = 200, description = "Department reassigned", body = UserView),
        (status = 403, description = "Owners and admins only"),
        (status = 404, description = "User not found")
    ),
    params(
        ("id" = Uuid, Path, description = "User id"),
        ("x-org-id" = Option<Uuid>, Header, description = "Organization (owners only)")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_department(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    RequestedOrg(org): RequestedOrg,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateDepartmentPayload>,
) -> Result<Json<UserView>, AppError> {
    let user = app_state
        .user_service
        .reassign_department(&actor, org, id, payload.department)
        .await?;
    Ok(Json(user))
}
