// src/services/user_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::expect_affected, error::AppError},
    db::{OrganizationRepository, UserRepository},
    models::auth::{Actor, CreateUserPayload, Department, Role, UserView},
    services::{
        credentials::DynPasswordHasher,
        policy::{authorize, authorize_in, resolve_org_scope, Operation},
    },
};

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    org_repo: OrganizationRepository,
    hasher: DynPasswordHasher,
    pool: PgPool,
}

impl UserService {
    pub fn new(user_repo: UserRepository, org_repo: OrganizationRepository, hasher: DynPasswordHasher, pool: PgPool) -> Self {
        Self { user_repo, org_repo, hasher, pool }
    }

    /// Creates an admin or employee inside the actor's effective organization.
    pub async fn create_org_user(
        &self,
        actor: &Actor,
        requested_org: Option<Uuid>,
        payload: &CreateUserPayload,
    ) -> Result<UserView, AppError> {
        let org_id = authorize_in(actor, Operation::CreateUser { role: payload.role }, requested_org)?;

        let password_hash = self.hasher.hash(&payload.password).await?;

        let mut tx = self.pool.begin().await?;

        if self
            .user_repo
            .username_or_email_taken(&mut *tx, &payload.username, &payload.email)
            .await?
        {
            return Err(AppError::Conflict("Username or email already registered".into()));
        }

        let user_id = self
            .user_repo
            .create_user(
                &mut *tx,
                Some(org_id),
                &payload.email,
                &payload.username,
                &password_hash,
                payload.full_name.as_deref(),
                payload.role,
            )
            .await?;

        if let Some(department) = payload.department {
            let department_id = self
                .org_repo
                .ensure_department(&mut *tx, org_id, department, actor.id)
                .await?;
            self.org_repo.link_user(&mut *tx, user_id, department_id).await?;
        }

        let user = self
            .user_repo
            .find_view_by_id(&mut *tx, user_id)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        tx.commit().await?;

        tracing::info!(
            created_by = %actor.id,
            user_id = %user_id,
            org_id = %org_id,
            role = %payload.role,
            "organization user created"
        );
        Ok(user)
    }

    pub async fn list_users(
        &self,
        actor: &Actor,
        requested_org: Option<Uuid>,
        role: Option<Role>,
    ) -> Result<Vec<UserView>, AppError> {
        let org_id = authorize_in(actor, Operation::ManageUsers, requested_org)?;
        self.user_repo.list_views_by_org(org_id, role).await
    }

    /// Deletes a same-organization user the actor outranks.
    pub async fn delete_user(&self, actor: &Actor, requested_org: Option<Uuid>, target_id: Uuid) -> Result<(), AppError> {
        let org_id = authorize_in(actor, Operation::ManageUsers, requested_org)?;

        let mut tx = self.pool.begin().await?;

        let target = self
            .user_repo
            .find_view_in_org(&mut *tx, target_id, org_id)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        authorize(actor, Operation::DeleteUser { target_role: target.role })?;

        let removed = self.user_repo.delete_in_org(&mut *tx, target_id, org_id).await?;
        expect_affected(removed, "User")?;

        tx.commit().await?;

        tracing::info!(deleted_by = %actor.id, user_id = %target_id, org_id = %org_id, "user deleted");
        Ok(())
    }

    /// Moves a user to `department`, leaving them with exactly that one link.
    pub async fn reassign_department(
        &self,
        actor: &Actor,
        requested_org: Option<Uuid>,
        target_id: Uuid,
        department: Department,
    ) -> Result<UserView, AppError> {
        authorize(actor, Operation::AssignDepartment)?;
        let org_id = resolve_org_scope(actor, requested_org)?;

        let mut tx = self.pool.begin().await?;

        self.user_repo
            .find_view_in_org(&mut *tx, target_id, org_id)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        let department_id = self
            .org_repo
            .ensure_department(&mut *tx, org_id, department, actor.id)
            .await?;
        self.org_repo.link_user(&mut *tx, target_id, department_id).await?;
        self.org_repo.unlink_others(&mut *tx, target_id, department_id).await?;

        let user = self
            .user_repo
            .find_view_by_id(&mut *tx, target_id)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        tx.commit().await?;

        tracing::info!(user_id = %target_id, department = department.as_str(), "department reassigned");
        Ok(user)
    }
}
