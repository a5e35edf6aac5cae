//! Upstream Module
//!
//! Client and path layout for the third-party aggregator API.

mod chain;
mod client;

pub use chain::Chain;
pub use client::AggregatorClient;

// == Upstream Paths ==
/// Swap quote for a token pair
pub fn quote_path(chain: Chain) -> String {
    format!("/swap/v6.0/{}/quote", chain.id())
}

/// Token list of a chain
pub fn tokens_path(chain: Chain) -> String {
    format!("/token/v1.2/{}", chain.id())
}

/// Token balances of a wallet
pub fn balances_path(chain: Chain, address: &str) -> String {
    format!("/balance/v1.2/{}/balances/{}", chain.id(), address)
}

/// Limit orders created by a wallet
pub fn orders_by_maker_path(chain: Chain, address: &str) -> String {
    format!("/orderbook/v4.0/{}/address/{}", chain.id(), address)
}

/// Limit order submission
pub fn submit_order_path(chain: Chain) -> String {
    format!("/orderbook/v4.0/{}", chain.id())
}
