//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use lp_metrics_domain::prelude::*;
//! ```

// Entities
pub use crate::entities::{EventKind, LiquidityEvent, PoolSnapshot, Token};

// Errors
pub use crate::error::MetricsError;

// Metrics
pub use crate::metrics::{
    CurrentData, EntryData, ImpermanentLoss, PositionMetrics, PositionPnL, PositionSize,
    compute_position_metrics,
};
