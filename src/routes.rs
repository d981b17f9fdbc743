// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route(
            "/me",
            get(handlers::auth::get_me).layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        );

    let organization_routes = Router::new().route(
        "/",
        post(handlers::tenancy::create_organization).get(handlers::tenancy::list_organizations),
    );

    let user_routes = Router::new()
        .route("/", post(handlers::users::create_user).get(handlers::users::list_users))
        .route("/{id}", delete(handlers::users::delete_user))
        .route("/{id}/department", patch(handlers::users::update_department));

    let stock_routes = Router::new()
        .route("/", post(handlers::inventory::create_item).get(handlers::inventory::list_items))
        .route(
            "/{id}",
            patch(handlers::inventory::update_item).delete(handlers::inventory::delete_item),
        );

    let sales_routes = Router::new()
        .route("/", post(handlers::sales::record_sale).get(handlers::sales::list_sales));

    let analytics_routes = Router::new()
        .route("/summary", get(handlers::analytics::get_summary))
        .route("/loss", post(handlers::analytics::record_loss))
        .route("/losses", get(handlers::analytics::list_losses));

    let supplier_routes = Router::new()
        .route("/", post(handlers::suppliers::create_supplier).get(handlers::suppliers::list_suppliers));

    let shipment_routes = Router::new()
        .route("/", post(handlers::suppliers::create_shipment).get(handlers::suppliers::list_shipments))
        .route("/{id}/status", patch(handlers::suppliers::update_shipment_status))
        .route("/{id}/rate", post(handlers::suppliers::rate_shipment));

    let protected_routes = Router::new()
        .nest("/organizations", organization_routes)
        .nest("/users", user_routes)
        .nest("/stock", stock_routes)
        .nest("/sales", sales_routes)
        .nest("/analytics", analytics_routes)
        .nest("/suppliers", supplier_routes)
        .nest("/shipments", shipment_routes)
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let api_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/auth", auth_routes)
        .merge(protected_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .with_state(app_state)
}
