//! Data access for LP position metrics.
//!
//! This crate provides the [`PositionDataSource`] seam the metrics service
//! reads through, and a GraphQL subgraph implementation of it.

/// Data source configuration.
pub mod config;
/// Subgraph GraphQL client.
pub mod subgraph;

pub use config::{ConfigError, MAX_PAGE_SIZE, SubgraphConfig};
pub use subgraph::{SubgraphClient, SubgraphError};

use anyhow::Result;
use async_trait::async_trait;
use lp_metrics_domain::entities::{LiquidityEvent, PoolSnapshot};
use std::sync::Arc;

/// Source of liquidity events and pool state.
#[async_trait]
pub trait PositionDataSource: Send + Sync {
    /// Fetches a user's liquidity events in a pool, newest first.
    async fn fetch_events(
        &self,
        user_address: &str,
        pool_address: &str,
    ) -> Result<Vec<LiquidityEvent>>;

    /// Fetches the current state of a pool.
    async fn fetch_current_pool_state(&self, pool_address: &str) -> Result<PoolSnapshot>;

    /// Fetches a user's liquidity events across all pools, newest first.
    async fn fetch_user_events(&self, user_address: &str) -> Result<Vec<LiquidityEvent>>;
}

#[async_trait]
impl<T: PositionDataSource + ?Sized> PositionDataSource for Arc<T> {
    async fn fetch_events(
        &self,
        user_address: &str,
        pool_address: &str,
    ) -> Result<Vec<LiquidityEvent>> {
        (**self).fetch_events(user_address, pool_address).await
    }

    async fn fetch_current_pool_state(&self, pool_address: &str) -> Result<PoolSnapshot> {
        (**self).fetch_current_pool_state(pool_address).await
    }

    async fn fetch_user_events(&self, user_address: &str) -> Result<Vec<LiquidityEvent>> {
        (**self).fetch_user_events(user_address).await
    }
}
