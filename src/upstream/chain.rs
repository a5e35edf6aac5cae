//! Supported chains
//!
//! Chain identifiers the aggregator serves. Requests for any other chain are
//! rejected before reaching upstream.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ProxyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Ethereum,
    Optimism,
    Bsc,
    Gnosis,
    Polygon,
    Base,
    Arbitrum,
    Avalanche,
}

impl Chain {
    pub const ALL: [Chain; 8] = [
        Chain::Ethereum,
        Chain::Optimism,
        Chain::Bsc,
        Chain::Gnosis,
        Chain::Polygon,
        Chain::Base,
        Chain::Arbitrum,
        Chain::Avalanche,
    ];

    pub fn id(&self) -> u64 {
        match self {
            Chain::Ethereum => 1,
            Chain::Optimism => 10,
            Chain::Bsc => 56,
            Chain::Gnosis => 100,
            Chain::Polygon => 137,
            Chain::Base => 8453,
            Chain::Arbitrum => 42161,
            Chain::Avalanche => 43114,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Optimism => "optimism",
            Chain::Bsc => "bsc",
            Chain::Gnosis => "gnosis",
            Chain::Polygon => "polygon",
            Chain::Base => "base",
            Chain::Arbitrum => "arbitrum",
            Chain::Avalanche => "avalanche",
        }
    }

    pub fn from_id(id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|chain| chain.id() == id)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Chain {
    type Err = ProxyError;

    /// Parses a decimal chain id such as `"1"` or `"42161"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u64 = s
            .trim()
            .parse()
            .map_err(|_| ProxyError::InvalidRequest(format!("Invalid chainId: {}", s)))?;
        Self::from_id(id)
            .ok_or_else(|| ProxyError::InvalidRequest(format!("Unsupported chainId: {}", id)))
    }
}
