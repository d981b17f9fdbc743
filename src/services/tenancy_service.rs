// src/services/tenancy_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{OrganizationRepository, UserRepository},
    models::{
        auth::{Actor, Role},
        tenancy::Organization,
    },
    services::policy::{authorize, Operation},
};

#[derive(Clone)]
pub struct TenantService {
    org_repo: OrganizationRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl TenantService {
    pub fn new(org_repo: OrganizationRepository, user_repo: UserRepository, pool: PgPool) -> Self {
        Self { org_repo, user_repo, pool }
    }

    /// Creates an organization owned by the actor, with its default departments.
    pub async fn create_organization(&self, actor: &Actor, name: &str) -> Result<Organization, AppError> {
        authorize(actor, Operation::CreateOrganization)?;

        let mut tx = self.pool.begin().await?;

        let org = self.org_repo.create_org(&mut *tx, name, actor.id).await?;
        self.org_repo.seed_departments(&mut *tx, org.id, actor.id).await?;
        let assigned = self.user_repo.set_org_if_missing(&mut *tx, actor.id, org.id).await?;

        tx.commit().await?;

        tracing::info!(
            org_id = %org.id,
            owner_id = %actor.id,
            became_default = assigned,
            "organization created"
        );
        Ok(org)
    }

    /// Owners see what they created; everyone else sees their assigned organization.
    pub async fn list_organizations(&self, actor: &Actor) -> Result<Vec<Organization>, AppError> {
        match (actor.role, actor.org_id) {
            (Role::Owner, _) => self.org_repo.list_owned(actor.id).await,
            (_, Some(org_id)) => Ok(self.org_repo.find_by_id(org_id).await?.into_iter().collect()),
            (_, None) => Ok(Vec::new()),
        }
    }
}
