//! Response DTOs for the proxy API
//!
//! Bodies produced by the proxy itself. Proxied routes return the upstream
//! JSON unchanged and are not modelled here.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for GET /api/cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    /// TTL applied to every entry, in milliseconds
    pub ttl_ms: u64,
}

impl CacheStatsResponse {
    pub fn new(stats: CacheStats, ttl_ms: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            ttl_ms,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Placeholder portfolio returned by GET /api/portfolio
///
/// The aggregator has no portfolio endpoint on the plans this proxy targets,
/// so the dashboard is served an empty, well-formed portfolio.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub address: String,
    pub total_value_usd: String,
    pub positions: Vec<PortfolioPosition>,
    /// Always true; marks the payload as placeholder data
    pub demo: bool,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPosition {
    pub chain_id: u64,
    pub token: String,
    pub symbol: String,
    pub balance: String,
    pub value_usd: String,
}

impl PortfolioResponse {
    pub fn demo(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            total_value_usd: "0.00".to_string(),
            positions: Vec::new(),
            demo: true,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
