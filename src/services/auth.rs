// src/services/auth.rs

use chrono::Duration;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OrganizationRepository, UserRepository},
    models::auth::{Actor, RegisterUserPayload, Role, UserView},
    services::credentials::{decode_token, encode_token, DynPasswordHasher},
};

/// Name given to the organization created at owner sign-up.
pub fn default_org_name(username: &str) -> String {
    format!("{username}'s Organization")
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    org_repo: OrganizationRepository,
    hasher: DynPasswordHasher,
    jwt_secret: String,
    token_ttl: Duration,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        org_repo: OrganizationRepository,
        hasher: DynPasswordHasher,
        jwt_secret: String,
        token_ttl: Duration,
        pool: PgPool,
    ) -> Self {
        Self { user_repo, org_repo, hasher, jwt_secret, token_ttl, pool }
    }

    /// Signs up an owner together with a fresh organization and its default departments.
    pub async fn register_owner(&self, payload: &RegisterUserPayload) -> Result<UserView, AppError> {
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
                None,
                &payload.email,
                &payload.username,
                &password_hash,
                payload.full_name.as_deref(),
                Role::Owner,
            )
            .await?;

        let org = self
            .org_repo
            .create_org(&mut *tx, &default_org_name(&payload.username), user_id)
            .await?;
        self.org_repo.seed_departments(&mut *tx, org.id, user_id).await?;
        self.user_repo.set_org(&mut *tx, user_id, org.id).await?;

        let user = self
            .user_repo
            .find_view_by_id(&mut *tx, user_id)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        tx.commit().await?;

        tracing::info!(user_id = %user_id, org_id = %org.id, "owner registered");
        Ok(user)
    }

    /// Checks credentials and returns the user id. Every failure looks the same.
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<Uuid, AppError> {
        let creds = self
            .user_repo
            .find_credentials(login)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !creds.is_active {
            return Err(AppError::InvalidCredentials);
        }
        if !self.hasher.verify(password, &creds.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }
        Ok(creds.id)
    }

    pub async fn login(&self, login: &str, password: &str) -> Result<String, AppError> {
        let user_id = self.authenticate(login, password).await?;
        tracing::debug!(user_id = %user_id, "login succeeded");
        encode_token(&self.jwt_secret, user_id, self.token_ttl)
    }

    /// Verifies a bearer token and resolves the acting identity.
    pub async fn resolve_actor(&self, token: &str) -> Result<Actor, AppError> {
        let user_id = decode_token(&self.jwt_secret, token)?;

        let row = self
            .user_repo
            .find_actor_row(user_id)
            .await?
            .filter(|row| row.is_active)
            .ok_or(AppError::InvalidToken)?;

        let owned_orgs = match row.role {
            Role::Owner => self.org_repo.owned_ids(row.id).await?,
            Role::Admin | Role::Employee => Vec::new(),
        };

        Ok(Actor {
            id: row.id,
            org_id: row.org_id,
            role: row.role,
            department: row.department,
            owned_orgs,
        })
    }

    pub async fn me(&self, actor: &Actor) -> Result<UserView, AppError> {
        self.user_repo
            .find_view_by_id(&self.pool, actor.id)
            .await?
            .ok_or(AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_org_is_named_after_the_username() {
        assert_eq!(default_org_name("maria"), "maria's Organization");
    }
}
