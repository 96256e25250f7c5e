//! Average entry pricing.

use super::{EntryData, checked};
use crate::entities::LiquidityEvent;
use crate::error::MetricsError;
use rust_decimal::Decimal;

/// Computes USD-weighted average entry prices and deposit/withdrawal totals.
///
/// Each deposit contributes its event-time `token0_price` and `token1_price`
/// weighted by its USD value. When the total weight is zero both averages are
/// zero. Withdrawn USD is summed as absolute values.
///
/// # Errors
///
/// Returns [`MetricsError::Overflow`] if a weighted sum or average leaves the
/// decimal range.
pub fn calculate_entry_data(events: &[LiquidityEvent]) -> Result<EntryData, MetricsError> {
    let mut weighted_price0 = Decimal::ZERO;
    let mut weighted_price1 = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;
    let mut total_withdrawn_usd = Decimal::ZERO;

    for event in events {
        if event.is_deposit() {
            let weight = event.usd_value();
            weighted_price0 = accumulate(weighted_price0, event.pool.token0_price, weight)?;
            weighted_price1 = accumulate(weighted_price1, event.pool.token1_price, weight)?;
            total_weight = checked(total_weight.checked_add(weight), "total deposited USD")?;
        } else if event.is_withdrawal() {
            total_withdrawn_usd = checked(
                total_withdrawn_usd.checked_add(event.usd_value().abs()),
                "total withdrawn USD",
            )?;
        }
    }

    let (average_entry_price0, average_entry_price1) = if total_weight > Decimal::ZERO {
        (
            checked(weighted_price0.checked_div(total_weight), "average entry price")?,
            checked(weighted_price1.checked_div(total_weight), "average entry price")?,
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    Ok(EntryData {
        average_entry_price0,
        average_entry_price1,
        total_deposited_usd: total_weight,
        total_withdrawn_usd,
    })
}

fn accumulate(sum: Decimal, price: Decimal, weight: Decimal) -> Result<Decimal, MetricsError> {
    let next = price.checked_mul(weight).and_then(|v| sum.checked_add(v));
    checked(next, "weighted entry price")
}
