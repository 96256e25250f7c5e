//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use lp_metrics_service::prelude::*;
//! ```

pub use crate::service::{PoolPositionMetrics, PositionMetricsService};

pub use lp_metrics_data::{PositionDataSource, SubgraphClient, SubgraphConfig};
pub use lp_metrics_domain::prelude::*;
