// src/db/tenancy_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{auth::Department, tenancy::Organization},
};

#[derive(Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_org<'e, E>(
        &self,
        executor: E,
        name: &str,
        created_by: Uuid,
    ) -> Result<Organization, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let org = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name, created_by)
            VALUES ($1, $2)
            RETURNING id, name, created_by, created_at
            "#,
        )
        .bind(name)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(org)
    }

    /// Organizations created by `owner_id`, oldest first.
    pub async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<Organization>, AppError> {
        let orgs = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, created_by, created_at
            FROM organizations
            WHERE created_by = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(orgs)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, AppError> {
        let org = sqlx::query_as::<_, Organization>(
            "SELECT id, name, created_by, created_at FROM organizations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(org)
    }

    pub async fn owned_ids(&self, owner_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM organizations WHERE created_by = $1")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    // ---
    // Departments
    // ---

    /// Creates the default departments of a new organization.
    pub async fn seed_departments<'e, E>(&self, executor: E, org_id: Uuid, created_by: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let names: Vec<Department> = Department::DEFAULTS.to_vec();
        sqlx::query(
            r#"
            INSERT INTO departments (org_id, name, created_by)
            SELECT $1, d, $3 FROM UNNEST($2::department_name[]) AS d
            ON CONFLICT (org_id, name) DO NOTHING
            "#,
        )
        .bind(org_id)
        .bind(names)
        .bind(created_by)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Returns the department's id, creating it if the organization lacks it.
    pub async fn ensure_department<'e, E>(
        &self,
        executor: E,
        org_id: Uuid,
        name: Department,
        created_by: Uuid,
    ) -> Result<Uuid, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // DO UPDATE (not DO NOTHING) so RETURNING also yields an existing row.
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO departments (org_id, name, created_by)
            VALUES ($1, $2, $3)
            ON CONFLICT (org_id, name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(org_id)
        .bind(name)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(id)
    }

    pub async fn link_user<'e, E>(&self, executor: E, user_id: Uuid, department_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO user_departments (user_id, department_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(department_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Drops every department link of the user except `keep`.
    pub async fn unlink_others<'e, E>(&self, executor: E, user_id: Uuid, keep: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM user_departments WHERE user_id = $1 AND department_id <> $2")
            .bind(user_id)
            .bind(keep)
            .execute(executor)
            .await?;
        Ok(())
    }
}
