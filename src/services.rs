pub mod analytics_service;
pub mod auth;
pub mod credentials;
pub mod inventory_service;
pub mod ledger_service;
pub mod policy;
pub mod supplier_service;
pub mod tenancy_service;
pub mod user_service;
