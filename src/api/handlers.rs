//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::HeaderValue,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::{cache_key, CacheStats, TtlCache};
use crate::config::Config;
use crate::debounce::{debounce, Debounced};
use crate::error::{ProxyError, Result};
use crate::models::requests::validate_order_body;
use crate::models::{
    CacheStatsResponse, ChainQuery, HealthResponse, PortfolioQuery, PortfolioResponse, QuoteQuery,
    WalletQuery,
};
use crate::upstream::{self, AggregatorClient};

/// Header telling the client whether a cacheable response came from cache
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Application state shared across all handlers.
///
/// The response cache is owned here and injected into handlers through
/// axum's `State`; there is no process-wide cache.
#[derive(Clone)]
pub struct AppState {
    /// Memoized upstream read responses
    pub cache: Arc<TtlCache<Value>>,
    /// Aggregator API client
    pub upstream: Arc<AggregatorClient>,
    /// Logs a cache summary once request bursts go quiet
    pub stats_reporter: Debounced<CacheStats>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(cache: TtlCache<Value>, upstream: AggregatorClient, stats_log_delay: Duration) -> Self {
        let stats_reporter = debounce(
            |stats: CacheStats| {
                info!(
                    hits = stats.hits,
                    misses = stats.misses,
                    expirations = stats.expirations,
                    entries = stats.total_entries,
                    hit_rate = stats.hit_rate(),
                    "Response cache activity settled"
                );
            },
            stats_log_delay,
        );

        Self {
            cache: Arc::new(cache),
            upstream: Arc::new(upstream),
            stats_reporter,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .upstream_api_key
            .as_ref()
            .map(|key| SecretString::from(key.expose_secret().to_owned()));
        let upstream = AggregatorClient::new(
            &config.upstream_base_url,
            api_key,
            config.upstream_timeout(),
        )?;

        Ok(Self::new(
            TtlCache::new(config.cache_ttl()),
            upstream,
            config.stats_log_debounce(),
        ))
    }

    // == Cached Read ==
    /// Serves `key` from cache, or fetches `path` upstream and caches it.
    ///
    /// Only successful upstream bodies are stored.
    async fn cached_get(&self, key: String, path: &str, query: &[(&str, &str)]) -> Result<Response> {
        if let Some(body) = self.cache.get(&key) {
            debug!(key = %key, "Cache hit");
            self.stats_reporter.call(self.cache.stats());
            return Ok(with_cache_status(body, "HIT"));
        }

        debug!(key = %key, "Cache miss, forwarding upstream");
        let body = self.upstream.get_json(path, query).await?;
        self.cache.set(key, body.clone());
        self.stats_reporter.call(self.cache.stats());

        Ok(with_cache_status(body, "MISS"))
    }
}

fn with_cache_status(body: Value, status: &'static str) -> Response {
    (
        [(CACHE_STATUS_HEADER, HeaderValue::from_static(status))],
        Json(body),
    )
        .into_response()
}

fn query_params<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ProxyError::InvalidRequest(rejection.body_text()))
}

/// Handler for GET /api/quote
///
/// Swap quote for a token pair, cached per (chain, src, dst, amount).
pub async fn quote_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<QuoteQuery>, QueryRejection>,
) -> Result<Response> {
    let query = query_params(query)?;
    let chain = query.validate()?;

    let chain_id = chain.id().to_string();
    let src = query.src.to_ascii_lowercase();
    let dst = query.dst.to_ascii_lowercase();
    let key = cache_key(
        "quote",
        [
            ("chainId", chain_id.as_str()),
            ("src", src.as_str()),
            ("dst", dst.as_str()),
            ("amount", query.amount.as_str()),
        ],
    );

    state
        .cached_get(
            key,
            &upstream::quote_path(chain),
            &[
                ("src", src.as_str()),
                ("dst", dst.as_str()),
                ("amount", query.amount.as_str()),
            ],
        )
        .await
}

/// Handler for GET /api/tokens
///
/// Token list of a chain, cached per chain.
pub async fn tokens_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<ChainQuery>, QueryRejection>,
) -> Result<Response> {
    let chain = query_params(query)?.validate()?;
    let chain_id = chain.id().to_string();
    let key = cache_key("tokens", [("chainId", chain_id.as_str())]);

    state
        .cached_get(key, &upstream::tokens_path(chain), &[])
        .await
}

/// Handler for GET /api/balances
///
/// Token balances of a wallet, cached per (chain, address).
pub async fn balances_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<WalletQuery>, QueryRejection>,
) -> Result<Response> {
    let query = query_params(query)?;
    let chain = query.validate()?;
    let chain_id = chain.id().to_string();
    let address = query.address.to_ascii_lowercase();
    let key = cache_key(
        "balances",
        [("chainId", chain_id.as_str()), ("address", address.as_str())],
    );

    state
        .cached_get(key, &upstream::balances_path(chain, &address), &[])
        .await
}

/// Handler for GET /api/limit-orders
///
/// Open limit orders of a wallet. Not cached so that a freshly placed order
/// shows up immediately.
pub async fn list_orders_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<WalletQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let query = query_params(query)?;
    let chain = query.validate()?;
    let address = query.address.to_ascii_lowercase();

    let body = state
        .upstream
        .get_json(&upstream::orders_by_maker_path(chain, &address), &[])
        .await?;
    Ok(Json(body))
}

/// Handler for POST /api/limit-orders
///
/// Forwards a signed limit order upstream unchanged.
pub async fn submit_order_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<ChainQuery>, QueryRejection>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>> {
    let chain = query_params(query)?.validate()?;
    let Json(order) = body.map_err(|rejection| ProxyError::InvalidRequest(rejection.body_text()))?;
    validate_order_body(&order)?;

    info!(chain = chain.name(), "Submitting limit order upstream");
    let response = state
        .upstream
        .post_json(&upstream::submit_order_path(chain), &order)
        .await?;
    Ok(Json(response))
}

/// Handler for GET /api/portfolio
///
/// Returns placeholder portfolio data for the dashboard.
pub async fn portfolio_handler(
    query: std::result::Result<Query<PortfolioQuery>, QueryRejection>,
) -> Result<Json<PortfolioResponse>> {
    let query = query_params(query)?;
    query.validate()?;
    Ok(Json(PortfolioResponse::demo(query.address)))
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let ttl_ms = state.cache.ttl().as_millis() as u64;
    Json(CacheStatsResponse::new(state.cache.stats(), ttl_ms))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for unknown routes
pub async fn not_found_handler() -> ProxyError {
    ProxyError::NotFound("no such route".to_string())
}
