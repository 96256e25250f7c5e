//! Plain-text rendering of position metrics.

use lp_metrics_domain::PositionMetrics;
use std::fmt;

/// Human-readable report of a metrics record.
pub struct Report<'a> {
    metrics: &'a PositionMetrics,
}

impl<'a> Report<'a> {
    pub fn new(metrics: &'a PositionMetrics) -> Self {
        Self { metrics }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = &self.metrics.position_size;
        let il = &self.metrics.impermanent_loss;
        let entry = &self.metrics.entry_data;
        let current = &self.metrics.current_data;
        let pnl = &self.metrics.pnl;

        writeln!(f, "\n=== POSITION METRICS ===")?;

        writeln!(f, "\n📊 POSITION SIZE:")?;
        writeln!(f, "  {}: {:.6}", size.token0_symbol, size.amount0)?;
        writeln!(f, "  {}: {:.6}", size.token1_symbol, size.amount1)?;
        writeln!(f, "  Total USD Value: ${:.2}", size.total_usd)?;

        writeln!(f, "\n💰 IMPERMANENT LOSS:")?;
        writeln!(f, "  Loss Percentage: {:.2}%", il.percentage)?;
        writeln!(f, "  Entry Value: ${:.2}", il.entry_value)?;
        writeln!(f, "  Current Value: ${:.2}", il.current_value)?;
        writeln!(f, "  Hold Value: ${:.2}", il.hold_value)?;
        writeln!(f, "  Loss Amount: ${:.2}", il.loss_amount)?;

        writeln!(f, "\n📈 ENTRY DATA:")?;
        writeln!(
            f,
            "  Average Entry Price {}: ${:.6}",
            size.token0_symbol, entry.average_entry_price0
        )?;
        writeln!(
            f,
            "  Average Entry Price {}: ${:.6}",
            size.token1_symbol, entry.average_entry_price1
        )?;
        writeln!(f, "  Total Deposited: ${:.2}", entry.total_deposited_usd)?;
        writeln!(f, "  Total Withdrawn: ${:.2}", entry.total_withdrawn_usd)?;

        writeln!(f, "\n🎯 CURRENT DATA:")?;
        writeln!(
            f,
            "  Current Price {}: ${:.6}",
            size.token0_symbol, current.current_price0
        )?;
        writeln!(
            f,
            "  Current Price {}: ${:.6}",
            size.token1_symbol, current.current_price1
        )?;
        writeln!(
            f,
            "  Position In Range: {}",
            if current.is_in_range { "✅ Yes" } else { "❌ No" }
        )?;

        writeln!(f, "\n💵 YIELD:")?;
        writeln!(f, "  Unrealized PnL: ${:.2}", pnl.unrealized_pnl_usd)?;
        writeln!(f, "  Realized (Withdrawn): ${:.2}", pnl.realized_usd)?;
        writeln!(f, "  Net PnL: ${:.2}", pnl.net_pnl_usd)?;
        writeln!(f, "  ROI: {:.2}%", pnl.roi_percent)?;

        writeln!(f, "\n========================")
    }
}
