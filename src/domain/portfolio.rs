//! Portfolio of reconstructed trades and the queries over them.
//!
//! Every query considers closed trades only. Swing trades are excluded unless
//! `include_swing` is set.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use super::error::TradeClipperError;
use super::execution::{parse_executions, Execution};
use super::reconstruct::Reconstructor;
use super::trade::Trade;
use crate::ports::statement_port::StatementPort;
use tracing::info;

/// Close-time filter. `None` ignores that component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl DateFilter {
    /// Matches every date.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn year(year: i32) -> Self {
        DateFilter {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn date(date: NaiveDate) -> Self {
        DateFilter {
            year: Some(date.year()),
            month: Some(date.month()),
            day: Some(date.day()),
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        self.year.is_none_or(|y| date.year() == y)
            && self.month.is_none_or(|m| date.month() == m)
            && self.day.is_none_or(|d| date.day() == d)
    }
}

/// Green and red day counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayCounts {
    pub green: usize,
    pub red: usize,
}

/// Realized result for one close date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyProfit {
    pub date: NaiveDate,
    pub trades: usize,
    pub profit: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    pub trades: Vec<Trade>,
    pub include_swing: bool,
}

impl Portfolio {
    pub fn new(trades: Vec<Trade>) -> Self {
        Portfolio {
            trades,
            include_swing: false,
        }
    }

    /// Reconstruct a portfolio from time-ordered executions.
    pub fn from_executions(executions: &[Execution]) -> Self {
        let mut reconstructor = Reconstructor::new();
        reconstructor.feed(executions);
        Portfolio::new(reconstructor.finish())
    }

    pub fn with_swing(mut self, include_swing: bool) -> Self {
        self.include_swing = include_swing;
        self
    }

    /// Closed trades matching `filter`, in close-time order.
    pub fn filter_trades(&self, filter: &DateFilter) -> Vec<&Trade> {
        self.trades
            .iter()
            .filter(|t| t.is_closed())
            .filter(|t| t.close_time.is_some_and(|c| filter.matches(c.date())))
            .filter(|t| self.include_swing || !t.is_swing())
            .collect()
    }

    /// Every closed trade that passes the swing toggle.
    pub fn closed_trades(&self) -> Vec<&Trade> {
        self.filter_trades(&DateFilter::any())
    }

    /// Trades still holding a position.
    pub fn open_trades(&self) -> Vec<&Trade> {
        self.trades.iter().filter(|t| t.is_open()).collect()
    }

    pub fn trade_count(&self, filter: &DateFilter) -> usize {
        self.filter_trades(filter).len()
    }

    /// Opened shares across matching trades, regardless of direction.
    pub fn shares_traded(&self, filter: &DateFilter) -> i64 {
        self.filter_trades(filter)
            .iter()
            .map(|t| t.total_share_count.abs())
            .sum()
    }

    pub fn profit(&self, filter: &DateFilter) -> f64 {
        self.filter_trades(filter)
            .iter()
            .filter_map(|t| t.profit())
            .sum()
    }

    /// Share of matching trades with profit >= 0; `None` for no trades.
    pub fn win_percentage(&self, filter: &DateFilter) -> Option<f64> {
        let trades = self.filter_trades(filter);
        if trades.is_empty() {
            return None;
        }
        let wins = trades
            .iter()
            .filter(|t| t.profit().is_some_and(|p| p >= 0.0))
            .count();
        Some(wins as f64 / trades.len() as f64)
    }

    /// Profit divided by shares traded; `None` when no shares were traded.
    pub fn profit_per_share(&self, filter: &DateFilter) -> Option<f64> {
        let shares = self.shares_traded(filter);
        if shares == 0 {
            return None;
        }
        Some(self.profit(filter) / shares as f64)
    }

    /// Mean profit per trade; `None` for no trades.
    pub fn average_trade_profit(&self, filter: &DateFilter) -> Option<f64> {
        let count = self.trade_count(filter);
        if count == 0 {
            return None;
        }
        Some(self.profit(filter) / count as f64)
    }

    /// Distinct close dates, ascending.
    pub fn trading_days(&self, filter: &DateFilter) -> Vec<NaiveDate> {
        let mut days: Vec<NaiveDate> = self
            .filter_trades(filter)
            .iter()
            .filter_map(|t| t.close_time.map(|c| c.date()))
            .collect();
        days.sort();
        days.dedup();
        days
    }

    /// Count days by summed profit, grouping trades by open date.
    ///
    /// Trades are walked in open-time order and split into runs that share
    /// an open date; a run summing to >= 0 is green. No trades gives zero
    /// of each.
    pub fn green_red_days(&self, filter: &DateFilter) -> DayCounts {
        let mut trades = self.filter_trades(filter);
        trades.sort_by_key(|t| t.open_time);

        let mut counts = DayCounts::default();
        let mut current: Option<(Option<NaiveDate>, f64)> = None;

        for trade in trades {
            let day = trade.open_time.map(|t| t.date());
            let profit = trade.profit().unwrap_or(0.0);
            current = match current {
                Some((run_day, total)) if run_day == day => Some((run_day, total + profit)),
                Some((_, total)) => {
                    counts.tally(total);
                    Some((day, profit))
                }
                None => Some((day, profit)),
            };
        }

        if let Some((_, total)) = current {
            counts.tally(total);
        }
        counts
    }

    /// Profit and trade count per close date, ascending.
    pub fn daily_profits(&self, filter: &DateFilter) -> Vec<DailyProfit> {
        let mut by_day: BTreeMap<NaiveDate, (usize, f64)> = BTreeMap::new();
        for trade in self.filter_trades(filter) {
            if let (Some(close), Some(profit)) = (trade.close_time, trade.profit()) {
                let entry = by_day.entry(close.date()).or_default();
                entry.0 += 1;
                entry.1 += profit;
            }
        }
        by_day
            .into_iter()
            .map(|(date, (trades, profit))| DailyProfit {
                date,
                trades,
                profit,
            })
            .collect()
    }
}

/// Load every statement from `port` and rebuild its trades.
///
/// Executions from all statements are merged into one time-ordered stream
/// before reconstruction, so positions held across statement boundaries
/// resolve into a single trade.
pub fn load_portfolio(port: &dyn StatementPort) -> Result<Portfolio, TradeClipperError> {
    let statements = port.load_statements()?;
    let mut executions: Vec<Execution> = statements
        .iter()
        .flat_map(|s| parse_executions(&s.rows))
        .collect();
    executions.sort_by_key(|e| e.time);

    let portfolio = Portfolio::from_executions(&executions);
    info!(
        executions = executions.len(),
        trades = portfolio.trades.len(),
        open = portfolio.open_trades().len(),
        "rebuilt trades"
    );
    Ok(portfolio)
}

impl DayCounts {
    fn tally(&mut self, total: f64) {
        if total >= 0.0 {
            self.green += 1;
        } else {
            self.red += 1;
        }
    }
}
