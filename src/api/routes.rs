//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    balances_handler, cache_stats_handler, health_handler, list_orders_handler, not_found_handler,
    portfolio_handler, quote_handler, submit_order_handler, tokens_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/quote` - Swap quote (cached)
/// - `GET /api/tokens` - Token list (cached)
/// - `GET /api/balances` - Wallet balances (cached)
/// - `GET /api/limit-orders` - Wallet limit orders
/// - `POST /api/limit-orders` - Submit a limit order
/// - `GET /api/portfolio` - Placeholder portfolio
/// - `GET /api/cache/stats` - Response cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin so the browser dashboard can call the proxy
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/quote", get(quote_handler))
        .route("/api/tokens", get(tokens_handler))
        .route("/api/balances", get(balances_handler))
        .route(
            "/api/limit-orders",
            get(list_orders_handler).post(submit_order_handler),
        )
        .route("/api/portfolio", get(portfolio_handler))
        .route("/api/cache/stats", get(cache_stats_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
