// src/config.rs

use std::{env, net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AnalyticsRepository, InventoryRepository, OrganizationRepository, SalesRepository,
        SupplierRepository, UserRepository,
    },
    services::{
        analytics_service::AnalyticsService,
        auth::AuthService,
        credentials::{BcryptHasher, DynPasswordHasher},
        inventory_service::InventoryService,
        ledger_service::LedgerService,
        supplier_service::SupplierService,
        tenancy_service::TenantService,
        user_service::UserService,
    },
};

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub token_ttl: chrono::Duration,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        Ok(Self {
            database_url,
            jwt_secret,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10)?,
            db_acquire_timeout: Duration::from_secs(parse_or("DB_ACQUIRE_TIMEOUT_SECS", 3)?),
            token_ttl: chrono::Duration::minutes(parse_or("TOKEN_TTL_MINUTES", 30)?),
            bind_addr: parse_or("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{key} has an invalid value {raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub tenant_service: TenantService,
    pub inventory_service: InventoryService,
    pub ledger_service: LedgerService,
    pub analytics_service: AnalyticsService,
    pub supplier_service: SupplierService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect(&config.database_url)
            .await
            .context("failed to connect to the database")?;

        tracing::info!(max_connections = config.db_max_connections, "database pool ready");

        Ok(Self::from_pool(db_pool, config))
    }

    /// Wires every repository and service around an existing pool.
    pub fn from_pool(db_pool: PgPool, config: &Config) -> Self {
        let hasher: DynPasswordHasher = Arc::new(BcryptHasher::default());

        let user_repo = UserRepository::new(db_pool.clone());
        let org_repo = OrganizationRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let sales_repo = SalesRepository::new(db_pool.clone());
        let analytics_repo = AnalyticsRepository::new(db_pool.clone());
        let supplier_repo = SupplierRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            org_repo.clone(),
            hasher.clone(),
            config.jwt_secret.clone(),
            config.token_ttl,
            db_pool.clone(),
        );
        let user_service = UserService::new(user_repo.clone(), org_repo.clone(), hasher, db_pool.clone());
        let tenant_service = TenantService::new(org_repo, user_repo, db_pool.clone());
        let inventory_service = InventoryService::new(inventory_repo.clone());
        let ledger_service =
            LedgerService::new(inventory_repo, sales_repo, analytics_repo.clone(), db_pool.clone());
        let analytics_service = AnalyticsService::new(analytics_repo);
        let supplier_service = SupplierService::new(supplier_repo, db_pool.clone());

        Self {
            db_pool,
            auth_service,
            user_service,
            tenant_service,
            inventory_service,
            ledger_service,
            analytics_service,
            supplier_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_when_unset() {
        let value: u32 = parse_or("BIZIT_TEST_SURELY_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }
}
