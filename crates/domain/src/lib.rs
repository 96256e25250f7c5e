//! Domain model and metric calculations for LP positions.
//!
//! This crate is free of I/O. It provides:
//! - Liquidity events and pool snapshots as reported by the indexer
//! - Position size aggregation over deposit events
//! - USD-weighted average entry pricing
//! - Current price and in-range resolution
//! - Impermanent loss and PnL summaries

/// Prelude module for convenient imports.
pub mod prelude;

/// Domain entities.
pub mod entities;
/// Error types.
pub mod error;
/// Position metric calculations.
pub mod metrics;

pub use error::MetricsError;
pub use metrics::{PositionMetrics, compute_position_metrics};
