//! Aggregate portfolio statistics for a date filter.

use super::portfolio::{DateFilter, DayCounts, Portfolio};

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioStats {
    pub total_trades: usize,
    pub trades_won: usize,
    pub trades_lost: usize,
    /// `None` when no trades matched.
    pub win_rate: Option<f64>,
    pub profit: f64,
    pub shares_traded: i64,
    pub profit_per_share: Option<f64>,
    pub avg_trade: Option<f64>,
    pub largest_win: f64,
    pub largest_loss: f64,
    /// Mean holding time in seconds.
    pub avg_hold_seconds: Option<f64>,
    pub trading_days: usize,
    pub days: DayCounts,
    pub open_positions: usize,
}

impl PortfolioStats {
    pub fn compute(portfolio: &Portfolio, filter: &DateFilter) -> Self {
        let trades = portfolio.filter_trades(filter);

        let mut trades_won = 0usize;
        let mut trades_lost = 0usize;
        let mut largest_win = 0.0_f64;
        let mut largest_loss = 0.0_f64;
        let mut total_hold = 0i64;

        for trade in &trades {
            let profit = trade.profit().unwrap_or(0.0);
            if profit >= 0.0 {
                trades_won += 1;
                largest_win = largest_win.max(profit);
            } else {
                trades_lost += 1;
                largest_loss = largest_loss.max(profit.abs());
            }
            if let Some(duration) = trade.duration() {
                total_hold += duration.num_seconds();
            }
        }

        let total_trades = trades.len();
        let avg_hold_seconds = if total_trades > 0 {
            Some(total_hold as f64 / total_trades as f64)
        } else {
            None
        };

        PortfolioStats {
            total_trades,
            trades_won,
            trades_lost,
            win_rate: portfolio.win_percentage(filter),
            profit: portfolio.profit(filter),
            shares_traded: portfolio.shares_traded(filter),
            profit_per_share: portfolio.profit_per_share(filter),
            avg_trade: portfolio.average_trade_profit(filter),
            largest_win,
            largest_loss,
            avg_hold_seconds,
            trading_days: portfolio.trading_days(filter).len(),
            days: portfolio.green_red_days(filter),
            open_positions: portfolio.open_trades().len(),
        }
    }
}
