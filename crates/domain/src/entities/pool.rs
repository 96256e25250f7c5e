use crate::entities::token::Token;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// State of a pool at a point in time.
///
/// Attached to every liquidity event (prices at event time) and fetched on its
/// own for the current state. Token prices are already expressed in USD terms
/// by the indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    pub address: String,
    pub token0: Token,
    pub token1: Token,
    pub tick: i32,
    pub token0_price: Decimal,
    pub token1_price: Decimal,
}

impl PoolSnapshot {
    pub fn new(address: impl Into<String>, token0: Token, token1: Token) -> Self {
        Self {
            address: address.into(),
            token0,
            token1,
            tick: 0,
            token0_price: Decimal::ZERO,
            token1_price: Decimal::ZERO,
        }
    }

    /// Sets the current tick.
    #[must_use]
    pub fn with_tick(mut self, tick: i32) -> Self {
        self.tick = tick;
        self
    }

    /// Sets the USD prices of both tokens.
    #[must_use]
    pub fn with_prices(mut self, token0_price: Decimal, token1_price: Decimal) -> Self {
        self.token0_price = token0_price;
        self.token1_price = token1_price;
        self
    }
}
