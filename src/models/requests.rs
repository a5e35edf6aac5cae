//! Request DTOs for the proxy API
//!
//! Query-string shapes accepted by each route, with validation that runs
//! before anything is sent upstream.

use serde::Deserialize;

use crate::error::{ProxyError, Result};
use crate::upstream::Chain;

/// Query for GET /api/quote
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteQuery {
    pub chain_id: String,
    /// Token being sold
    pub src: String,
    /// Token being bought
    pub dst: String,
    /// Sell amount in the token's smallest unit
    pub amount: String,
}

impl QuoteQuery {
    /// Validates the query and returns the parsed chain.
    pub fn validate(&self) -> Result<Chain> {
        let chain = self.chain_id.parse()?;
        validate_address("src", &self.src)?;
        validate_address("dst", &self.dst)?;
        if self.src.eq_ignore_ascii_case(&self.dst) {
            return Err(ProxyError::InvalidRequest(
                "src and dst must be different tokens".to_string(),
            ));
        }
        validate_amount(&self.amount)?;
        Ok(chain)
    }
}

/// Query for routes scoped to a chain only (GET /api/tokens, POST /api/limit-orders)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainQuery {
    pub chain_id: String,
}

impl ChainQuery {
    pub fn validate(&self) -> Result<Chain> {
        self.chain_id.parse()
    }
}

/// Query for routes scoped to a wallet on a chain
/// (GET /api/balances, GET /api/limit-orders)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletQuery {
    pub chain_id: String,
    pub address: String,
}

impl WalletQuery {
    pub fn validate(&self) -> Result<Chain> {
        let chain = self.chain_id.parse()?;
        validate_address("address", &self.address)?;
        Ok(chain)
    }
}

/// Query for GET /api/portfolio
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioQuery {
    pub address: String,
}

impl PortfolioQuery {
    pub fn validate(&self) -> Result<()> {
        validate_address("address", &self.address)
    }
}

// == Field Validation ==
/// Checks for a `0x`-prefixed, 20-byte hex address.
pub fn validate_address(field: &str, value: &str) -> Result<()> {
    let valid = value.len() == 42
        && (value.starts_with("0x") || value.starts_with("0X"))
        && value[2..].bytes().all(|b| b.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(ProxyError::InvalidRequest(format!(
            "{} must be a 0x-prefixed 40 hex digit address",
            field
        )))
    }
}

/// Checks for a positive integer amount written in decimal digits.
pub fn validate_amount(value: &str) -> Result<()> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProxyError::InvalidRequest(
            "amount must be a decimal integer in base units".to_string(),
        ));
    }
    if value.bytes().all(|b| b == b'0') {
        return Err(ProxyError::InvalidRequest(
            "amount must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Checks that a limit-order body is a JSON object.
pub fn validate_order_body(body: &serde_json::Value) -> Result<()> {
    if body.is_object() {
        Ok(())
    } else {
        Err(ProxyError::InvalidRequest(
            "limit order body must be a JSON object".to_string(),
        ))
    }
}
