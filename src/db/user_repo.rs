// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_unique_violation, error::AppError},
    models::auth::{Department, Role, UserCredentials, UserView},
};

// Users joined with their organization name and department link.
const USER_VIEW_SELECT: &str = r#"
    SELECT u.id, u.org_id, u.email, u.username, u.full_name, u.role,
           d.name AS department, o.name AS org_name, u.is_active, u.created_at
    FROM users u
    LEFT JOIN user_departments ud ON ud.user_id = u.id
    LEFT JOIN departments d ON d.id = ud.department_id
    LEFT JOIN organizations o ON o.id = u.org_id
"#;

#[derive(Debug, sqlx::FromRow)]
pub struct ActorRow {
    pub id: Uuid,
    pub org_id: Option<Uuid>,
    pub role: Role,
    pub department: Option<Department>,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Login lookup: `login` matches either the username or the email.
    pub async fn find_credentials(&self, login: &str) -> Result<Option<UserCredentials>, AppError> {
        let creds = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, password_hash, is_active FROM users WHERE username = $1 OR email = $1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;
        Ok(creds)
    }

    pub async fn find_actor_row(&self, id: Uuid) -> Result<Option<ActorRow>, AppError> {
        let row = sqlx::query_as::<_, ActorRow>(
            r#"
            SELECT u.id, u.org_id, u.role, d.name AS department, u.is_active
            FROM users u
            LEFT JOIN user_departments ud ON ud.user_id = u.id
            LEFT JOIN departments d ON d.id = ud.department_id
            WHERE u.id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn find_view_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<UserView>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!("{USER_VIEW_SELECT} WHERE u.id = $1 LIMIT 1");
        let user = sqlx::query_as::<_, UserView>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(user)
    }

    /// Same as `find_view_by_id` but invisible outside `org_id`.
    pub async fn find_view_in_org<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        org_id: Uuid,
    ) -> Result<Option<UserView>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!("{USER_VIEW_SELECT} WHERE u.id = $1 AND u.org_id = $2 LIMIT 1");
        let user = sqlx::query_as::<_, UserView>(&query)
            .bind(id)
            .bind(org_id)
            .fetch_optional(executor)
            .await?;
        Ok(user)
    }

    pub async fn list_views_by_org(&self, org_id: Uuid, role: Option<Role>) -> Result<Vec<UserView>, AppError> {
        let query = format!(
            "{USER_VIEW_SELECT} WHERE u.org_id = $1 AND ($2::user_role IS NULL OR u.role = $2) ORDER BY u.created_at ASC"
        );
        let users = sqlx::query_as::<_, UserView>(&query)
            .bind(org_id)
            .bind(role)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn username_or_email_taken<'e, E>(
        &self,
        executor: E,
        username: &str,
        email: &str,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(executor)
        .await?;
        Ok(taken)
    }

    /// Inserts a user and returns its id. Duplicate username/email is a Conflict.
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        org_id: Option<Uuid>,
        email: &str,
        username: &str,
        password_hash: &str,
        full_name: Option<&str>,
        role: Role,
    ) -> Result<Uuid, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (org_id, email, username, password_hash, full_name, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(org_id)
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .bind(full_name)
        .bind(role)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                "users_email_key" => AppError::Conflict("Email already exists".into()),
                "users_username_key" => AppError::Conflict("Username already exists".into()),
                _ => AppError::Conflict("Username or email already exists".into()),
            })
        })
    }

    pub async fn set_org<'e, E>(&self, executor: E, user_id: Uuid, org_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE users SET org_id = $2 WHERE id = $1")
            .bind(user_id)
            .bind(org_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Gives the user a default organization only if they had none.
    pub async fn set_org_if_missing<'e, E>(&self, executor: E, user_id: Uuid, org_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE users SET org_id = $2 WHERE id = $1 AND org_id IS NULL")
            .bind(user_id)
            .bind(org_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_in_org<'e, E>(&self, executor: E, id: Uuid, org_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND org_id = $2")
            .bind(id)
            .bind(org_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
