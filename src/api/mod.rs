//! API Module
//!
//! HTTP handlers and routing for the proxy REST API.
//!
//! # Endpoints
//! - `GET /api/quote` - Swap quote for a token pair (cached)
//! - `GET /api/tokens` - Token list of a chain (cached)
//! - `GET /api/balances` - Token balances of a wallet (cached)
//! - `GET|POST /api/limit-orders` - List or submit limit orders
//! - `GET /api/portfolio` - Placeholder portfolio
//! - `GET /api/cache/stats` - Response cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
