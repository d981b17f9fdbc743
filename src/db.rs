pub mod user_repo;
pub use user_repo::UserRepository;
pub mod tenancy_repo;
pub use tenancy_repo::OrganizationRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod sales_repo;
pub use sales_repo::SalesRepository;
pub mod analytics_repo;
pub use analytics_repo::AnalyticsRepository;
pub mod supplier_repo;
pub use supplier_repo::SupplierRepository;
