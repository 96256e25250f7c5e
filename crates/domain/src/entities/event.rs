//! Liquidity modification events.

use crate::entities::pool::PoolSnapshot;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of a liquidity event, derived from the sign of its delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Liquidity was added.
    Deposit,
    /// Liquidity was removed.
    Withdrawal,
    /// Zero delta. Counted as neither.
    Neutral,
}

/// A single on-chain liquidity modification by a user in a pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityEvent {
    /// Indexer event ID.
    pub id: String,
    /// Address that originated the transaction.
    pub origin: String,
    /// Block timestamp in seconds.
    pub timestamp: u64,
    /// Transaction hash.
    pub transaction_hash: Option<String>,
    /// Log index inside the transaction.
    pub log_index: Option<u64>,
    /// Signed liquidity delta. The sign alone tells deposits from withdrawals.
    pub liquidity_delta: i128,
    /// Signed token0 amount.
    pub amount0: Decimal,
    /// Signed token1 amount.
    pub amount1: Decimal,
    /// USD value at event time, if the indexer priced it.
    pub amount_usd: Option<Decimal>,
    /// Pool state observed at event time.
    pub pool: PoolSnapshot,
    /// Lower tick of the position range.
    pub tick_lower: i32,
    /// Upper tick of the position range.
    pub tick_upper: i32,
}

impl LiquidityEvent {
    /// Creates a new event with no USD valuation and an empty range.
    pub fn new(
        id: impl Into<String>,
        pool: PoolSnapshot,
        liquidity_delta: i128,
        amount0: Decimal,
        amount1: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            origin: String::new(),
            timestamp: 0,
            transaction_hash: None,
            log_index: None,
            liquidity_delta,
            amount0,
            amount1,
            amount_usd: None,
            pool,
            tick_lower: 0,
            tick_upper: 0,
        }
    }

    /// Sets the USD valuation.
    #[must_use]
    pub fn with_amount_usd(mut self, amount_usd: Decimal) -> Self {
        self.amount_usd = Some(amount_usd);
        self
    }

    /// Sets the position range.
    #[must_use]
    pub fn with_ticks(mut self, tick_lower: i32, tick_upper: i32) -> Self {
        self.tick_lower = tick_lower;
        self.tick_upper = tick_upper;
        self
    }

    /// Sets the originating address.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Sets the block timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn kind(&self) -> EventKind {
        match self.liquidity_delta.cmp(&0) {
            Ordering::Greater => EventKind::Deposit,
            Ordering::Less => EventKind::Withdrawal,
            Ordering::Equal => EventKind::Neutral,
        }
    }

    pub fn is_deposit(&self) -> bool {
        self.kind() == EventKind::Deposit
    }

    pub fn is_withdrawal(&self) -> bool {
        self.kind() == EventKind::Withdrawal
    }

    /// USD value of the event, zero when the indexer left it unpriced.
    pub fn usd_value(&self) -> Decimal {
        self.amount_usd.unwrap_or(Decimal::ZERO)
    }
}
