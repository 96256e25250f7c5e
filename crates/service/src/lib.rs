//! Position metrics service.
//!
//! Composes a [`lp_metrics_data::PositionDataSource`] with the pure metric calculations of
//! `lp-metrics-domain`:
//! - Per user/pool metrics with concurrent event and pool-state reads
//! - Portfolio metrics across every pool a user has touched

/// Prelude module for convenient imports.
pub mod prelude;

mod service;

pub use service::{PoolPositionMetrics, PositionMetricsService};
