//! Request and Response models for the proxy API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query strings and serializing response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ChainQuery, PortfolioQuery, QuoteQuery, WalletQuery};
pub use responses::{
    CacheStatsResponse, ErrorResponse, HealthResponse, PortfolioPosition, PortfolioResponse,
};
