//! Current position state.

use super::CurrentData;
use crate::entities::{LiquidityEvent, PoolSnapshot};

/// Returns whether `tick` lies in the half-open range `[tick_lower, tick_upper)`.
pub fn is_tick_in_range(tick: i32, tick_lower: i32, tick_upper: i32) -> bool {
    tick >= tick_lower && tick < tick_upper
}

/// Reads current prices from the pool and checks the sample event's range
/// against the current tick.
pub fn resolve_current_data(current_pool: &PoolSnapshot, sample: &LiquidityEvent) -> CurrentData {
    CurrentData {
        current_price0: current_pool.token0_price,
        current_price1: current_pool.token1_price,
        is_in_range: is_tick_in_range(current_pool.tick, sample.tick_lower, sample.tick_upper),
    }
}
