// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Organizations ---
        handlers::tenancy::create_organization,
        handlers::tenancy::list_organizations,

        // --- Users ---
        handlers::users::create_user,
        handlers::users::list_users,
        handlers::users::delete_user,
        handlers::users::update_department,

        // --- Stock ---
        handlers::inventory::create_item,
        handlers::inventory::list_items,
        handlers::inventory::update_item,
        handlers::inventory::delete_item,

        // --- Sales ---
        handlers::sales::record_sale,
        handlers::sales::list_sales,

        // --- Analytics ---
        handlers::analytics::get_summary,
        handlers::analytics::record_loss,
        handlers::analytics::list_losses,

        // --- Suppliers ---
        handlers::suppliers::create_supplier,
        handlers::suppliers::list_suppliers,
        handlers::suppliers::create_shipment,
        handlers::suppliers::list_shipments,
        handlers::suppliers::update_shipment_status,
        handlers::suppliers::rate_shipment,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::Department,
            models::auth::UserView,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::TokenResponse,
            models::auth::CreateUserPayload,
            models::auth::UpdateDepartmentPayload,

            // --- Organizations ---
            models::tenancy::Organization,
            models::tenancy::CreateOrganizationPayload,

            // --- Stock ---
            models::inventory::StockStatus,
            models::inventory::StockItem,
            models::inventory::StockItemView,
            models::inventory::CreateStockItemPayload,
            models::inventory::UpdateStockItemPayload,

            // --- Sales ---
            models::sales::Sale,
            models::sales::SaleView,
            models::sales::RecordSalePayload,

            // --- Analytics ---
            models::analytics::Loss,
            models::analytics::LossView,
            models::analytics::RecordLossPayload,
            models::analytics::AnalyticsSummary,

            // --- Suppliers ---
            models::suppliers::ShipmentStatus,
            models::suppliers::Supplier,
            models::suppliers::ShipmentView,
            models::suppliers::CreateSupplierPayload,
            models::suppliers::CreateShipmentPayload,
            models::suppliers::UpdateShipmentStatusPayload,
            models::suppliers::RateShipmentPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and identity"),
        (name = "Organizations", description = "Organizations owned or joined"),
        (name = "Users", description = "Organization members, roles and departments"),
        (name = "Stock", description = "Stock items and stock level status"),
        (name = "Sales", description = "Sales ledger"),
        (name = "Analytics", description = "Profit and loss, loss ledger"),
        (name = "Suppliers", description = "Suppliers, shipments and performance scores")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
