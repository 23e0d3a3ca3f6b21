use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::healthcheck))
        // Inventory routes
        .route("/api/sites", get(handlers::inventory::list_sites))
        .route("/api/sites", post(handlers::inventory::create_site))
        .route("/api/racks", get(handlers::inventory::list_racks))
        .route("/api/racks", post(handlers::inventory::create_rack))
        .route("/api/racks/:id/free-panel-ports", get(handlers::inventory::list_free_panel_ports))
        .route("/api/devices", get(handlers::inventory::list_devices))
        .route("/api/devices", post(handlers::inventory::create_device))
        .route("/api/devices/:id/ports", get(handlers::inventory::list_device_ports))
        .route("/api/ports", post(handlers::inventory::create_port))
        .route("/api/panels/pair", post(handlers::inventory::pair_panels))
        .route("/api/cables", get(handlers::inventory::list_cables))
        // Cabling workflows
        .route("/api/jumpers", post(handlers::jumpers::create_jumper))
        .route("/api/jumpers/plan", post(handlers::jumpers::plan_jumper))
        .route("/api/trunks", post(handlers::trunks::create_trunk))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
