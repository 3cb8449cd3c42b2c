//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - The `/api` routes for auth, transfers, purchases, and wallet info
//! - Bearer token authentication middleware
//! - Error responses with a stable `{error, message}` body

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use merchcoin_db::LedgerRepository;
use merchcoin_shared::{JwtService, LedgerConfig};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Ledger repository; the only writer of balances.
    pub ledger: Arc<LedgerRepository>,
    /// Ledger tuning, including the starting balance for new employees.
    pub ledger_config: LedgerConfig,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/api", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
