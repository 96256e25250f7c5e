use super::{EntryData, ImpermanentLoss, PositionPnL, checked};
use crate::error::MetricsError;
use rust_decimal::Decimal;

/// Summarises realized and unrealized yield.
///
/// Unrealized PnL is the current value of the held amounts over their cost
/// basis. Withdrawn USD counts as realized. Net PnL and ROI compare current
/// value plus withdrawals against total deposits.
///
/// # Errors
///
/// Returns [`MetricsError::Overflow`] if a result leaves the decimal range.
pub fn calculate_pnl(entry: &EntryData, il: &ImpermanentLoss) -> Result<PositionPnL, MetricsError> {
    let unrealized_pnl_usd = checked(
        il.current_value.checked_sub(il.entry_value),
        "unrealized PnL",
    )?;
    let realized_usd = entry.total_withdrawn_usd;
    let net_pnl_usd = checked(
        il.current_value
            .checked_add(entry.total_withdrawn_usd)
            .and_then(|v| v.checked_sub(entry.total_deposited_usd)),
        "net PnL",
    )?;

    let roi_percent = if entry.total_deposited_usd.is_zero() {
        Decimal::ZERO
    } else {
        checked(
            net_pnl_usd
                .checked_div(entry.total_deposited_usd)
                .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED)),
            "ROI",
        )?
    };

    Ok(PositionPnL {
        unrealized_pnl_usd,
        realized_usd,
        net_pnl_usd,
        roi_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn il(entry_value: Decimal, current_value: Decimal) -> ImpermanentLoss {
        ImpermanentLoss {
            percentage: Decimal::ZERO,
            entry_value,
            current_value,
            hold_value: current_value,
            loss_amount: Decimal::ZERO,
        }
    }

    #[test]
    fn test_pnl_with_withdrawals() {
        let entry = EntryData {
            average_entry_price0: dec!(2000),
            average_entry_price1: dec!(1),
            total_deposited_usd: dec!(5000),
            total_withdrawn_usd: dec!(1000),
        };

        let pnl = calculate_pnl(&entry, &il(dec!(5000), dec!(4500))).unwrap();
        assert_eq!(pnl.unrealized_pnl_usd, dec!(-500));
        assert_eq!(pnl.realized_usd, dec!(1000));
        assert_eq!(pnl.net_pnl_usd, dec!(500));
        assert_eq!(pnl.roi_percent, dec!(10));
    }

    #[test]
    fn test_roi_without_deposits() {
        let entry = EntryData {
            average_entry_price0: Decimal::ZERO,
            average_entry_price1: Decimal::ZERO,
            total_deposited_usd: Decimal::ZERO,
            total_withdrawn_usd: dec!(20),
        };

        let pnl = calculate_pnl(&entry, &il(Decimal::ZERO, Decimal::ZERO)).unwrap();
        assert_eq!(pnl.net_pnl_usd, dec!(20));
        assert_eq!(pnl.roi_percent, Decimal::ZERO);
    }

    #[test]
    fn test_net_past_decimal_range() {
        let entry = EntryData {
            average_entry_price0: dec!(1),
            average_entry_price1: dec!(1),
            total_deposited_usd: Decimal::ZERO,
            total_withdrawn_usd: dec!(1),
        };

        let result = calculate_pnl(&entry, &il(Decimal::ZERO, Decimal::MAX));
        assert_eq!(result, Err(MetricsError::Overflow("net PnL")));
    }
}
