//! Position metrics derived from a user's liquidity events.
//!
//! Each submodule computes one record. [`compute_position_metrics`] composes
//! them in order: size, entry pricing, current state, impermanent loss, PnL.

use crate::entities::{LiquidityEvent, PoolSnapshot};
use crate::error::MetricsError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod entry_pricing;
pub mod impermanent_loss;
pub mod pnl;
pub mod position_size;
pub mod position_state;

/// Token amounts and USD value accumulated from deposit events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSize {
    pub amount0: Decimal,
    pub amount1: Decimal,
    pub total_usd: Decimal,
    pub token0_symbol: String,
    pub token1_symbol: String,
}

/// Cost basis of the position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryData {
    pub average_entry_price0: Decimal,
    pub average_entry_price1: Decimal,
    pub total_deposited_usd: Decimal,
    pub total_withdrawn_usd: Decimal,
}

/// Current prices and range status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentData {
    pub current_price0: Decimal,
    pub current_price1: Decimal,
    pub is_in_range: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpermanentLoss {
    pub percentage: Decimal,
    pub entry_value: Decimal,
    pub current_value: Decimal,
    pub hold_value: Decimal,
    pub loss_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPnL {
    pub unrealized_pnl_usd: Decimal,
    pub realized_usd: Decimal,
    pub net_pnl_usd: Decimal,
    pub roi_percent: Decimal,
}

/// Full metrics record for one user/pool pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionMetrics {
    pub position_size: PositionSize,
    pub impermanent_loss: ImpermanentLoss,
    pub entry_data: EntryData,
    pub current_data: CurrentData,
    pub pnl: PositionPnL,
}

/// Computes the metrics record for a user's events in one pool.
///
/// # Arguments
///
/// * `events` - The user's liquidity events for the pool, newest first
/// * `current_pool` - The pool's current state
///
/// # Errors
///
/// Returns [`MetricsError::NoPositionData`] if `events` is empty and
/// [`MetricsError::Overflow`] if any intermediate value leaves the decimal range.
pub fn compute_position_metrics(
    events: &[LiquidityEvent],
    current_pool: &PoolSnapshot,
) -> Result<PositionMetrics, MetricsError> {
    let sample = events.first().ok_or(MetricsError::NoPositionData)?;

    let position_size = position_size::calculate_position_size(events)?;
    let entry_data = entry_pricing::calculate_entry_data(events)?;
    let current_data = position_state::resolve_current_data(current_pool, sample);
    let impermanent_loss =
        impermanent_loss::calculate_impermanent_loss(&position_size, &entry_data, &current_data)?;
    let pnl = pnl::calculate_pnl(&entry_data, &impermanent_loss)?;

    Ok(PositionMetrics {
        position_size,
        impermanent_loss,
        entry_data,
        current_data,
        pnl,
    })
}

fn checked(value: Option<Decimal>, quantity: &'static str) -> Result<Decimal, MetricsError> {
    value.ok_or(MetricsError::Overflow(quantity))
}


#[cfg(test)]
mod tests {
    use super::fixtures::{deposit, pool, withdrawal};
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_events_fail_without_partial_record() {
        let current = pool(dec!(2000), dec!(1));
        let result = compute_position_metrics(&[], &current);
        assert_eq!(result, Err(MetricsError::NoPositionData));
    }

    #[test]
    fn test_single_deposit_scenario() {
        let events = vec![deposit(dec!(1), dec!(2000), dec!(4000), dec!(2000), dec!(1))];
        let current = pool(dec!(2500), dec!(1)).with_tick(0);

        let metrics = compute_position_metrics(&events, &current).unwrap();

        assert_eq!(metrics.position_size.amount0, dec!(1));
        assert_eq!(metrics.position_size.amount1, dec!(2000));
        assert_eq!(metrics.position_size.total_usd, dec!(4000));
        assert_eq!(metrics.entry_data.average_entry_price0, dec!(2000));
        assert_eq!(metrics.entry_data.average_entry_price1, dec!(1));
        assert_eq!(metrics.entry_data.total_deposited_usd, dec!(4000));
        assert_eq!(metrics.entry_data.total_withdrawn_usd, Decimal::ZERO);
        assert!(metrics.current_data.is_in_range);

        // 1 * 2000 + 2000 * 1 at entry, 1 * 2500 + 2000 * 1 now
        assert_eq!(metrics.impermanent_loss.entry_value, dec!(4000));
        assert_eq!(metrics.impermanent_loss.current_value, dec!(4500));
        assert_eq!(metrics.pnl.unrealized_pnl_usd, dec!(500));
    }

    #[test]
    fn test_loss_is_always_zero_against_hold_value() {
        let events = vec![
            withdrawal(dec!(-0.5), dec!(-900), dec!(-1900), dec!(1800), dec!(1)),
            deposit(dec!(2), dec!(3000), dec!(7000), dec!(2000), dec!(1)),
            deposit(dec!(0.25), dec!(100), dec!(300), dec!(800), dec!(1)),
        ];
        let current = pool(dec!(1234.56), dec!(0.999)).with_tick(900);

        let metrics = compute_position_metrics(&events, &current).unwrap();

        assert_eq!(
            metrics.impermanent_loss.hold_value,
            metrics.impermanent_loss.current_value
        );
        assert_eq!(metrics.impermanent_loss.loss_amount, Decimal::ZERO);
        assert_eq!(metrics.impermanent_loss.percentage, Decimal::ZERO);
        assert!(!metrics.current_data.is_in_range);
    }

    #[test]
    fn test_range_is_read_from_most_recent_event() {
        let newest = deposit(dec!(1), dec!(1), dec!(2), dec!(1), dec!(1)).with_ticks(100, 200);
        let oldest = deposit(dec!(1), dec!(1), dec!(2), dec!(1), dec!(1)).with_ticks(-100, 0);
        let current = pool(dec!(1), dec!(1)).with_tick(150);

        let metrics = compute_position_metrics(&[newest, oldest], &current).unwrap();
        assert!(metrics.current_data.is_in_range);
    }

    #[test]
    fn test_out_of_range_current_value_is_an_error() {
        let events = vec![deposit(dec!(2), dec!(1), dec!(10), dec!(1), dec!(1))];
        let current = pool(Decimal::MAX, dec!(1));

        let result = compute_position_metrics(&events, &current);
        assert_eq!(result, Err(MetricsError::Overflow("current value")));
    }

    #[test]
    fn test_serializes_camel_case() {
        let events = vec![deposit(dec!(1), dec!(2000), dec!(4000), dec!(2000), dec!(1))];
        let metrics = compute_position_metrics(&events, &pool(dec!(2000), dec!(1))).unwrap();

        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json["positionSize"]["totalUsd"].is_string());
        assert_eq!(json["currentData"]["isInRange"], serde_json::Value::Bool(true));
        assert_eq!(json["positionSize"]["token0Symbol"], "WETH");
    }
}
