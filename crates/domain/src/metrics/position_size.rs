//! Position size aggregation.

use super::{PositionSize, checked};
use crate::entities::LiquidityEvent;
use crate::error::MetricsError;
use rust_decimal::Decimal;

/// Sums token amounts and USD value over deposit events.
///
/// Withdrawals and zero-delta events do not reduce or add to the size, so the
/// result is the gross deposited amount rather than a netted balance. Token
/// symbols are read from the first event.
///
/// # Errors
///
/// Returns [`MetricsError::NoPositionData`] if `events` is empty and
/// [`MetricsError::Overflow`] if a sum leaves the decimal range.
pub fn calculate_position_size(events: &[LiquidityEvent]) -> Result<PositionSize, MetricsError> {
    let first = events.first().ok_or(MetricsError::NoPositionData)?;

    let (amount0, amount1, total_usd) = events.iter().filter(|e| e.is_deposit()).try_fold(
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        |(a0, a1, usd), e| {
            Ok::<_, MetricsError>((
                checked(a0.checked_add(e.amount0), "position amount0")?,
                checked(a1.checked_add(e.amount1), "position amount1")?,
                checked(usd.checked_add(e.usd_value()), "position USD")?,
            ))
        },
    )?;

    Ok(PositionSize {
        amount0,
        amount1,
        total_usd,
        token0_symbol: first.pool.token0.symbol.clone(),
        token1_symbol: first.pool.token1.symbol.clone(),
    })
}
