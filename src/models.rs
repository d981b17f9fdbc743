pub mod analytics;
pub mod auth;
pub mod inventory;
pub mod sales;
pub mod suppliers;
pub mod tenancy;
