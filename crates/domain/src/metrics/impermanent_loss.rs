use super::{CurrentData, EntryData, ImpermanentLoss, PositionSize, checked};
use crate::error::MetricsError;
use rust_decimal::Decimal;

/// Values the held amounts at entry and current prices.
///
/// `entry_value = amount0 * avg_entry_price0 + amount1 * avg_entry_price1`
/// `current_value = amount0 * current_price0 + amount1 * current_price1`
///
/// The hold baseline is taken to be the current value, so `loss_amount` and
/// `percentage` are always zero. A true hold-strategy baseline would need the
/// deposit-time amounts valued at current prices.
///
/// # Errors
///
/// Returns [`MetricsError::Overflow`] if either valuation leaves the decimal
/// range.
pub fn calculate_impermanent_loss(
    size: &PositionSize,
    entry: &EntryData,
    current: &CurrentData,
) -> Result<ImpermanentLoss, MetricsError> {
    let entry_value = checked(
        value_at(size, entry.average_entry_price0, entry.average_entry_price1),
        "entry value",
    )?;
    let current_value = checked(
        value_at(size, current.current_price0, current.current_price1),
        "current value",
    )?;
    let hold_value = current_value;

    let loss_amount = current_value - hold_value;
    let percentage = if hold_value.is_zero() {
        Decimal::ZERO
    } else {
        checked(
            loss_amount
                .checked_div(hold_value)
                .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED)),
            "loss percentage",
        )?
    };

    Ok(ImpermanentLoss {
        percentage,
        entry_value,
        current_value,
        hold_value,
        loss_amount,
    })
}

fn value_at(size: &PositionSize, price0: Decimal, price1: Decimal) -> Option<Decimal> {
    size.amount0
        .checked_mul(price0)?
        .checked_add(size.amount1.checked_mul(price1)?)
}
