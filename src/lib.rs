//! RecipeMate backend
//!
//! Recipe catalog browsing plus per-user recipes and reminders, served over a JSON REST
//! API with SQLite persistence.

pub mod accounts;
pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod errors;
pub mod identity;
pub mod models;
pub mod notes;
pub mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use accounts::AccountService;
use catalog::Catalog;
use config::Config;
use db::SqliteDocumentStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteDocumentStore>,
    pub accounts: AccountService,
    pub catalog: Arc<Catalog>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // API routes
    let api_routes = Router::new()
        // Catalog
        .route("/catalog", get(api::browse_catalog))
        .route("/catalog/categories", get(api::list_categories))
        .route("/catalog/{id}", get(api::get_catalog_recipe))
        // Accounts
        .route("/auth/register", post(api::register))
        .route("/auth/login", post(api::login))
        .route("/auth/logout", post(api::logout))
        .route("/auth/me", get(api::current_identity))
        // Owned notes (recipes, reminders)
        .route(
            "/{collection}",
            get(api::list_notes).post(api::create_note),
        )
        .route(
            "/{collection}/{id}",
            put(api::update_note).delete(api::delete_note),
        )
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
