//! Orchestration of data fetching and metric computation.

use futures::future::try_join_all;
use lp_metrics_data::PositionDataSource;
use lp_metrics_domain::entities::LiquidityEvent;
use lp_metrics_domain::{MetricsError, PositionMetrics, compute_position_metrics};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Metrics for one pool of a user's portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolPositionMetrics {
    /// Pool address as reported by the data source.
    pub pool_address: String,
    /// Metrics for the user's events in this pool.
    pub metrics: PositionMetrics,
}

/// Computes position metrics from a data source.
///
/// Holds no mutable state. Clones share the same data source.
pub struct PositionMetricsService<S> {
    source: Arc<S>,
}

impl<S> Clone for PositionMetricsService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: PositionDataSource> PositionMetricsService<S> {
    /// Creates a new service owning the data source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::from_shared(Arc::new(source))
    }

    /// Creates a new service over a shared data source.
    #[must_use]
    pub fn from_shared(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Returns the data source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Computes metrics for a user's position in one pool.
    ///
    /// Events and the current pool state are fetched concurrently.
    ///
    /// # Errors
    /// Returns [`MetricsError::Computation`] if either fetch fails and
    /// [`MetricsError::NoPositionData`] if the user has no events in the pool.
    pub async fn compute_position_metrics(
        &self,
        user_address: &str,
        pool_address: &str,
    ) -> Result<PositionMetrics, MetricsError> {
        let (events, current_pool) = tokio::try_join!(
            self.source.fetch_events(user_address, pool_address),
            self.source.fetch_current_pool_state(pool_address),
        )
        .map_err(|e| {
            error!(user = user_address, pool = pool_address, error = %format!("{e:#}"), "Fetch failed");
            MetricsError::computation(format!("{e:#}"))
        })?;

        if events.is_empty() {
            warn!(user = user_address, pool = pool_address, "No position data");
            return Err(MetricsError::NoPositionData);
        }

        let metrics = compute_position_metrics(&events, &current_pool)?;

        info!(
            user = user_address,
            pool = pool_address,
            events = events.len(),
            total_usd = %metrics.position_size.total_usd,
            current_value = %metrics.impermanent_loss.current_value,
            in_range = metrics.current_data.is_in_range,
            "Position metrics computed"
        );

        Ok(metrics)
    }

    /// Computes metrics for every pool the user has liquidity events in.
    ///
    /// Pools are returned in the order of their most recent event. Current
    /// pool states are fetched concurrently.
    ///
    /// # Errors
    /// Returns [`MetricsError::Computation`] if any fetch fails and
    /// [`MetricsError::NoPositionData`] if the user has no events at all.
    pub async fn compute_all_position_metrics(
        &self,
        user_address: &str,
    ) -> Result<Vec<PoolPositionMetrics>, MetricsError> {
        let events = self
            .source
            .fetch_user_events(user_address)
            .await
            .map_err(|e| {
                error!(user = user_address, error = %format!("{e:#}"), "Fetch failed");
                MetricsError::computation(format!("{e:#}"))
            })?;

        if events.is_empty() {
            warn!(user = user_address, "No position data in any pool");
            return Err(MetricsError::NoPositionData);
        }

        let groups = group_by_pool(events);
        debug!(user = user_address, pools = groups.len(), "Grouped events by pool");

        let pools = try_join_all(
            groups
                .iter()
                .map(|(address, _)| self.source.fetch_current_pool_state(address)),
        )
        .await
        .map_err(|e| {
            error!(user = user_address, error = %format!("{e:#}"), "Pool fetch failed");
            MetricsError::computation(format!("{e:#}"))
        })?;

        groups
            .into_iter()
            .zip(pools)
            .map(|((pool_address, events), current_pool)| {
                let metrics = compute_position_metrics(&events, &current_pool)?;
                Ok::<_, MetricsError>(PoolPositionMetrics {
                    pool_address,
                    metrics,
                })
            })
            .collect()
    }
}

/// Splits events by pool, keeping first-seen pool order and event order.
fn group_by_pool(events: Vec<LiquidityEvent>) -> Vec<(String, Vec<LiquidityEvent>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<LiquidityEvent>)> = Vec::new();

    for event in events {
        let key = event.pool.address.to_lowercase();
        match index.get(&key).copied() {
            Some(i) => groups[i].1.push(event),
            None => {
                index.insert(key, groups.len());
                groups.push((event.pool.address.clone(), vec![event]));
            }
        }
    }

    groups
}
