//! Per-trade value object handed to export and clipping collaborators.

use chrono::NaiveDateTime;

use super::trade::{Trade, TradeSide};

/// Label timestamp layout, safe for file names.
pub const LABEL_TIME_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

#[derive(Debug, Clone, PartialEq)]
pub struct TradeSummary {
    pub ticker: String,
    pub side: TradeSide,
    pub open_time: NaiveDateTime,
    pub close_time: NaiveDateTime,
    pub total_shares: i64,
    pub opening_avg: Option<f64>,
    pub closing_avg: Option<f64>,
    pub profit: f64,
    /// Profit per share as a fraction of the average entry price.
    pub percent_gain: Option<f64>,
    pub swing: bool,
}

impl TradeSummary {
    /// Summarize a closed trade. Open trades have nothing to summarize.
    pub fn from_trade(trade: &Trade) -> Option<TradeSummary> {
        Some(TradeSummary {
            ticker: trade.ticker.clone(),
            side: trade.side,
            open_time: trade.open_time?,
            close_time: trade.close_time?,
            total_shares: trade.total_share_count.abs(),
            opening_avg: trade.opening_price_avg(),
            closing_avg: trade.closing_price_avg(),
            profit: trade.profit()?,
            percent_gain: trade.percent_gain(),
            swing: trade.is_swing(),
        })
    }

    /// `TICKER-YYYY-MM-DD-HH-MM-SS`, keyed on the open time.
    pub fn label(&self) -> String {
        format!("{}-{}", self.ticker, self.open_time.format(LABEL_TIME_FORMAT))
    }
}

/// Summaries for every closed trade in `trades`, preserving order.
pub fn summarize<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> Vec<TradeSummary> {
    trades.into_iter().filter_map(TradeSummary::from_trade).collect()
}
