// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// Closed enumerations (Postgres enums `user_role` / `department_name`)
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Work-function scope. "No department" is `Option::<Department>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "department_name", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Stock,
    Sales,
}

impl Department {
    /// Departments seeded into every new organization.
    pub const DEFAULTS: [Department; 2] = [Department::Stock, Department::Sales];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Stock => "stock",
            Department::Sales => "sales",
        }
    }
}

// ---
// Rows
// ---

// Credential row, only used by the login path.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub password_hash: String,
    pub is_active: bool,
}

/// A user joined with organization name and (at most one) department.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub org_id: Option<Uuid>,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub department: Option<Department>,
    pub org_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// The resolved identity every protected operation receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub org_id: Option<Uuid>,
    pub role: Role,
    pub department: Option<Department>,
    /// Organizations this actor created. Empty for non-owners.
    pub owned_orgs: Vec<Uuid>,
}

impl Actor {
    pub fn owns(&self, org_id: Uuid) -> bool {
        self.owned_orgs.contains(&org_id)
    }
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    #[validate(length(min = 3, max = 50, message = "Username must be 3 to 50 characters."))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must have at least 6 characters."))]
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    /// Username or email.
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self { access_token, token_type: "bearer".to_string() }
    }
}

// JWT claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // user id
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    #[validate(length(min = 3, max = 50, message = "Username must be 3 to 50 characters."))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must have at least 6 characters."))]
    pub password: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub department: Option<Department>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDepartmentPayload {
    pub department: Department,
}

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_and_departments_use_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Employee).unwrap(), "\"employee\"");
        assert_eq!(serde_json::from_str::<Department>("\"sales\"").unwrap(), Department::Sales);
        assert!(serde_json::from_str::<Department>("\"marketing\"").is_err());
    }

    #[test]
    fn create_user_payload_rejects_short_password() {
        let payload = CreateUserPayload {
            email: "e@x.io".into(),
            username: "emp".into(),
            password: "123".into(),
            full_name: None,
            role: Role::Employee,
            department: Some(Department::Stock),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
